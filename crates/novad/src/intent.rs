//! Intent classification types.
//!
//! The model replies with an open intent string; [`Intent`] is the closed
//! set the router dispatches over, with everything unrecognized landing on
//! `Unknown`.

use std::fmt;

/// Closed intent set for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TriggerWelcome,
    CheckOrder,
    ListOrders,
    ListCategories,
    ReturnPolicy,
    RecommendProduct,
    Greeting,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TriggerWelcome => "trigger_welcome",
            Intent::CheckOrder => "check_order",
            Intent::ListOrders => "list_orders",
            Intent::ListCategories => "list_categories",
            Intent::ReturnPolicy => "return_policy",
            Intent::RecommendProduct => "recommend_product",
            Intent::Greeting => "greeting",
            Intent::Unknown => "unknown",
        }
    }

    /// Parse an intent string. Unrecognized values map to Unknown.
    pub fn parse(s: &str) -> Self {
        match s {
            "trigger_welcome" => Intent::TriggerWelcome,
            "check_order" => Intent::CheckOrder,
            "list_orders" => Intent::ListOrders,
            "list_categories" => Intent::ListCategories,
            "return_policy" => Intent::ReturnPolicy,
            "recommend_product" => Intent::RecommendProduct,
            "greeting" => Intent::Greeting,
            _ => Intent::Unknown,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User tone as judged by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse a sentiment string. Anything unrecognized is neutral.
    pub fn parse(s: &str) -> Self {
        match s {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entities the model pulled out of the user message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentEntities {
    pub order_id: Option<String>,
    pub category: Option<String>,
    pub original_term: Option<String>,
}

impl IntentEntities {
    /// Order id with the stringified-null junk models emit filtered out.
    pub fn order_id_value(&self) -> Option<&str> {
        self.order_id
            .as_deref()
            .filter(|v| !v.is_empty() && *v != "null" && *v != "undefined")
    }
}

/// One classified request, recovered from a single provider reply.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    /// Trimmed intent string, echoed to the caller even when unrecognized.
    pub intent: String,
    pub entities: IntentEntities,
    pub sentiment: Sentiment,
    pub reasoning: String,
    /// Free text the model produced outside the JSON schema, if any.
    pub reply: Option<String>,
}

impl IntentResult {
    pub fn kind(&self) -> Intent {
        Intent::parse(&self.intent)
    }

    /// Term recorded for analytics: the user's own words, else the mapped
    /// category, else "N/A".
    pub fn analytics_term(&self) -> String {
        self.entities
            .original_term
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| self.entities.category.clone().filter(|c| !c.is_empty()))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parse_known_values() {
        assert_eq!(Intent::parse("check_order"), Intent::CheckOrder);
        assert_eq!(Intent::parse("trigger_welcome"), Intent::TriggerWelcome);
        assert_eq!(Intent::parse("recommend_product"), Intent::RecommendProduct);
    }

    #[test]
    fn test_intent_parse_unknown_values() {
        assert_eq!(Intent::parse("buy_me_a_boat"), Intent::Unknown);
        assert_eq!(Intent::parse(""), Intent::Unknown);
        assert_eq!(Intent::parse("Check_Order"), Intent::Unknown);
    }

    #[test]
    fn test_sentiment_defaults_neutral() {
        assert_eq!(Sentiment::parse("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::parse("grumpy"), Sentiment::Neutral);
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
    }

    #[test]
    fn test_order_id_value_filters_null_literals() {
        let entities = IntentEntities { order_id: Some("null".to_string()), ..Default::default() };
        assert_eq!(entities.order_id_value(), None);
        let entities = IntentEntities { order_id: Some("undefined".to_string()), ..Default::default() };
        assert_eq!(entities.order_id_value(), None);
        let entities = IntentEntities { order_id: Some("ORD-7601".to_string()), ..Default::default() };
        assert_eq!(entities.order_id_value(), Some("ORD-7601"));
    }

    #[test]
    fn test_analytics_term_fallback_chain() {
        let result = IntentResult {
            intent: "recommend_product".to_string(),
            entities: IntentEntities {
                order_id: None,
                category: Some("footwear".to_string()),
                original_term: Some("sneakers".to_string()),
            },
            sentiment: Sentiment::Neutral,
            reasoning: String::new(),
            reply: None,
        };
        assert_eq!(result.analytics_term(), "sneakers");

        let result = IntentResult {
            entities: IntentEntities {
                original_term: Some(String::new()),
                category: Some("footwear".to_string()),
                ..Default::default()
            },
            ..result
        };
        assert_eq!(result.analytics_term(), "footwear");

        let result = IntentResult { entities: IntentEntities::default(), ..result };
        assert_eq!(result.analytics_term(), "N/A");
    }
}
