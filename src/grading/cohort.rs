//! Three-way cohort routing.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::grading::types::GradeResult;

/// Output partition a student lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CohortGroup {
    #[serde(rename = "Group 1")]
    One,
    #[serde(rename = "Group 2")]
    Two,
    #[serde(rename = "Group 3")]
    Three,
}

impl CohortGroup {
    pub const ALL: [CohortGroup; 3] = [CohortGroup::One, CohortGroup::Two, CohortGroup::Three];

    /// Routes a roster `Group` value.
    ///
    /// Numeric 1 and 2 map to their groups; everything else, including a
    /// missing value, falls through to Group 3.
    pub fn classify(group: Option<&Value>) -> Self {
        match group.and_then(Value::as_f64) {
            Some(g) if g == 1.0 => CohortGroup::One,
            Some(g) if g == 2.0 => CohortGroup::Two,
            _ => CohortGroup::Three,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CohortGroup::One => "Group 1",
            CohortGroup::Two => "Group 2",
            CohortGroup::Three => "Group 3",
        }
    }

    /// Conventional report file name for the group.
    pub fn report_file_name(&self) -> &'static str {
        match self {
            CohortGroup::One => "group_1_scores.csv",
            CohortGroup::Two => "group_2_scores.csv",
            CohortGroup::Three => "group_3_scores.csv",
        }
    }
}

impl fmt::Display for CohortGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Results for every group, in roster order within each group.
///
/// All three groups are always present, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortResults {
    groups: BTreeMap<CohortGroup, Vec<GradeResult>>,
}

impl Default for CohortResults {
    fn default() -> Self {
        Self {
            groups: CohortGroup::ALL.iter().map(|g| (*g, Vec::new())).collect(),
        }
    }
}

impl CohortResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: CohortGroup, result: GradeResult) {
        self.groups.entry(group).or_default().push(result);
    }

    pub fn get(&self, group: CohortGroup) -> &[GradeResult] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of results across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Groups in `Group 1`, `Group 2`, `Group 3` order.
    pub fn iter(&self) -> impl Iterator<Item = (CohortGroup, &[GradeResult])> {
        self.groups.iter().map(|(g, r)| (*g, r.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_known_groups() {
        assert_eq!(CohortGroup::classify(Some(&json!(1))), CohortGroup::One);
        assert_eq!(CohortGroup::classify(Some(&json!(2))), CohortGroup::Two);
        assert_eq!(CohortGroup::classify(Some(&json!(1.0))), CohortGroup::One);
    }

    #[test]
    fn test_classify_fallback() {
        let values = [
            json!(0),
            json!(3),
            json!(-1),
            json!(7.5),
            json!("1"),
            json!(true),
            json!(null),
        ];
        for value in values {
            assert_eq!(CohortGroup::classify(Some(&value)), CohortGroup::Three);
        }
        assert_eq!(CohortGroup::classify(None), CohortGroup::Three);
    }

    #[test]
    fn test_results_always_have_three_groups() {
        let results = CohortResults::new();
        let groups: Vec<_> = results.iter().map(|(g, _)| g.label()).collect();

        assert_eq!(groups, vec!["Group 1", "Group 2", "Group 3"]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut results = CohortResults::new();
        results.push(CohortGroup::Two, GradeResult::new("B", 2, 70));
        results.push(CohortGroup::Two, GradeResult::new("C", 3, 90));

        let names: Vec<_> = results
            .get(CohortGroup::Two)
            .iter()
            .map(|r| r.student_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!(results.get(CohortGroup::One).is_empty());
        assert_eq!(results.len(), 2);
    }
}
