//! Declarative row filtering
//!
//! Filter rules arrive as configuration data ([`FilterRule`]) and are
//! compiled once per scenario: list operands are checked, prefixes are
//! lowercased, and regexes are built up front so a bad pattern surfaces
//! as a configuration error instead of a per-row failure. Any comparison
//! against a None field evaluates to false, so rows with unparseable
//! cells drop out of every comparison they appear in.

use crate::fields;
use regex::Regex;
use storegraph_common::{AppRecord, Result, StoregraphError};
use storegraph_config::{CompareOp, CompareRule, Field, FilterRule, RuleValue};
use tracing::{debug, instrument};

/// A compiled, ready-to-evaluate filter
#[derive(Debug)]
pub struct RowFilter {
    rules: Vec<CompiledRule>,
}

#[derive(Debug)]
enum CompiledRule {
    Compare(CompiledCompare),
    AnyOf(Vec<Vec<CompiledCompare>>),
}

#[derive(Debug)]
struct CompiledCompare {
    field: Field,
    op: CompareOp,
    number: Option<f64>,
    text: Option<String>,
    /// Lowercased prefixes for the prefix operators
    prefixes: Vec<String>,
    /// Exact values for set membership
    set: Vec<String>,
    regex: Option<Regex>,
}

impl CompiledCompare {
    fn compile(rule: &CompareRule) -> Result<Self> {
        let mut compiled = Self {
            field: rule.field,
            op: rule.op,
            number: None,
            text: None,
            prefixes: Vec::new(),
            set: Vec::new(),
            regex: None,
        };

        let wrong_operand = |expected: &str| {
            StoregraphError::config(format!(
                "filter rule on {:?} with operator {:?} needs a {} operand",
                rule.field, rule.op, expected
            ))
        };

        match rule.op {
            CompareOp::Gte | CompareOp::Gt | CompareOp::Lt | CompareOp::Lte => {
                compiled.number =
                    Some(rule.value.as_number().ok_or_else(|| wrong_operand("numeric"))?);
            }
            CompareOp::Eq => match &rule.value {
                RuleValue::Number(n) => compiled.number = Some(*n),
                RuleValue::Text(s) => compiled.text = Some(s.clone()),
                RuleValue::List(_) => return Err(wrong_operand("numeric or text")),
            },
            CompareOp::StartsWithAny | CompareOp::NotStartsWithAny => {
                let prefixes: Vec<String> = match &rule.value {
                    RuleValue::Text(s) => vec![s.clone()],
                    RuleValue::List(items) => items.clone(),
                    RuleValue::Number(_) => return Err(wrong_operand("text or list")),
                };
                compiled.prefixes = prefixes.iter().map(|p| p.to_lowercase()).collect();
            }
            CompareOp::In => {
                compiled.set = rule
                    .value
                    .as_list()
                    .ok_or_else(|| wrong_operand("list"))?
                    .to_vec();
            }
            CompareOp::NotMatches => {
                let pattern = rule.value.as_text().ok_or_else(|| wrong_operand("text"))?;
                let regex = Regex::new(pattern).map_err(|e| {
                    StoregraphError::config_with_source(
                        format!("invalid filter regex '{}'", pattern),
                        e,
                    )
                })?;
                compiled.regex = Some(regex);
            }
        }

        Ok(compiled)
    }

    fn eval(&self, record: &AppRecord) -> bool {
        match self.op {
            CompareOp::Gte | CompareOp::Gt | CompareOp::Lt | CompareOp::Lte => {
                let (Some(value), Some(literal)) =
                    (fields::numeric(self.field, record), self.number)
                else {
                    return false;
                };
                match self.op {
                    CompareOp::Gte => value >= literal,
                    CompareOp::Gt => value > literal,
                    CompareOp::Lt => value < literal,
                    CompareOp::Lte => value <= literal,
                    _ => unreachable!(),
                }
            }
            CompareOp::Eq => {
                if let Some(literal) = self.number {
                    fields::numeric(self.field, record) == Some(literal)
                } else if let Some(literal) = &self.text {
                    fields::text(self.field, record) == Some(literal.as_str())
                } else {
                    false
                }
            }
            CompareOp::StartsWithAny | CompareOp::NotStartsWithAny => {
                let Some(value) = fields::text(self.field, record) else {
                    return false;
                };
                let value = value.to_lowercase();
                let matched = self.prefixes.iter().any(|p| value.starts_with(p));
                if self.op == CompareOp::StartsWithAny {
                    matched
                } else {
                    !matched
                }
            }
            CompareOp::In => match fields::text(self.field, record) {
                Some(value) => self.set.iter().any(|item| item == value),
                None => false,
            },
            CompareOp::NotMatches => {
                let (Some(value), Some(regex)) =
                    (fields::text(self.field, record), self.regex.as_ref())
                else {
                    return false;
                };
                !regex.is_match(value)
            }
        }
    }
}

impl RowFilter {
    /// Compile a rule set; invalid operands or regexes are config errors
    pub fn compile(rules: &[FilterRule]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule {
                FilterRule::Compare(rule) => {
                    compiled.push(CompiledRule::Compare(CompiledCompare::compile(rule)?));
                }
                FilterRule::AnyOf { any_of } => {
                    let groups = any_of
                        .iter()
                        .map(|group| group.iter().map(CompiledCompare::compile).collect())
                        .collect::<Result<Vec<Vec<_>>>>()?;
                    compiled.push(CompiledRule::AnyOf(groups));
                }
            }
        }
        Ok(Self { rules: compiled })
    }

    /// Whether a single record satisfies the whole conjunction
    pub fn matches(&self, record: &AppRecord) -> bool {
        self.rules.iter().all(|rule| match rule {
            CompiledRule::Compare(compare) => compare.eval(record),
            CompiledRule::AnyOf(groups) => groups
                .iter()
                .any(|group| group.iter().all(|compare| compare.eval(record))),
        })
    }

    /// Select the records satisfying the rule set
    #[instrument(skip(self, records))]
    pub fn apply<'a>(&self, records: &'a [AppRecord]) -> Vec<&'a AppRecord> {
        let selected: Vec<&AppRecord> = records.iter().filter(|r| self.matches(r)).collect();
        debug!(
            input = records.len(),
            selected = selected.len(),
            "Applied row filter"
        );
        selected
    }
}
