use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the results of a rule list are combined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    #[default]
    And,
    Or,
}

/// Single dependency condition: satisfied when `depends_on`, read as a
/// checkbox, equals `show_when`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub depends_on: String,
    pub show_when: bool,
}

impl ConditionalRule {
    pub fn new(depends_on: impl Into<String>, show_when: bool) -> Self {
        Self {
            depends_on: depends_on.into(),
            show_when,
        }
    }
}

/// Member of a rule list: a leaf rule or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Condition {
    Rule(ConditionalRule),
    Group(ConditionalLogic),
}

impl From<ConditionalRule> for Condition {
    fn from(rule: ConditionalRule) -> Self {
        Condition::Rule(rule)
    }
}

impl From<ConditionalLogic> for Condition {
    fn from(group: ConditionalLogic) -> Self {
        Condition::Group(group)
    }
}

/// Visibility specification attached to a field.
///
/// Both the general `{ operator?, rules }` shape and the older single-rule
/// `{ dependsOn, showWhen }` shape deserialize into this type; the latter
/// becomes a one-rule `AND` list. Serialization always writes the general
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "RawConditionalLogic")]
pub struct ConditionalLogic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    pub rules: Vec<Condition>,
}

impl ConditionalLogic {
    pub fn new<I, C>(operator: Operator, rules: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self {
            operator: Some(operator),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    /// Every member must hold.
    pub fn all<I, C>(rules: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(Operator::And, rules)
    }

    /// At least one member must hold.
    pub fn any<I, C>(rules: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(Operator::Or, rules)
    }

    /// Normalizes the single-rule shape into a one-rule `AND` list.
    pub fn from_legacy(rule: ConditionalRule) -> Self {
        Self::all([rule])
    }

    /// Operator in effect, `AND` when none was declared.
    pub fn effective_operator(&self) -> Operator {
        self.operator.unwrap_or_default()
    }

    /// Flattened leaf rules in declaration order, nested groups included.
    pub fn to_rule_list(&self) -> Vec<&ConditionalRule> {
        let mut out = Vec::new();
        collect_rules(&self.rules, &mut out);
        out
    }

    /// Returns true when any leaf rule depends on `field_id`.
    pub fn depends_on(&self, field_id: &str) -> bool {
        self.to_rule_list()
            .iter()
            .any(|rule| rule.depends_on == field_id)
    }
}

fn collect_rules<'a>(conditions: &'a [Condition], out: &mut Vec<&'a ConditionalRule>) {
    for condition in conditions {
        match condition {
            Condition::Rule(rule) => out.push(rule),
            Condition::Group(group) => collect_rules(&group.rules, out),
        }
    }
}

/// Wire shapes accepted for [`ConditionalLogic`].
#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
enum RawConditionalLogic {
    General {
        #[serde(default)]
        operator: Option<Operator>,
        rules: Vec<Condition>,
    },
    Legacy(ConditionalRule),
}

impl From<RawConditionalLogic> for ConditionalLogic {
    fn from(raw: RawConditionalLogic) -> Self {
        match raw {
            RawConditionalLogic::General { operator, rules } => Self { operator, rules },
            RawConditionalLogic::Legacy(rule) => Self::from_legacy(rule),
        }
    }
}
