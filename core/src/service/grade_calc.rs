use crate::input::parse_numeric;
use crate::model::class::Class;

/// Weight that makes up a complete course, in percentage points.
pub const FULL_WEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradeSummary {
    pub current_grade: f64,
    pub needed_grade: f64,
    pub total_weight: f64,
    pub remaining_weight: f64,
}

impl GradeSummary {
    /// The figures as they are displayed: two decimals, one for remaining weight.
    pub fn rounded(&self) -> Self {
        Self {
            current_grade: round_to(self.current_grade, 2),
            needed_grade: round_to(self.needed_grade, 2),
            total_weight: round_to(self.total_weight, 2),
            remaining_weight: round_to(self.remaining_weight, 1),
        }
    }

    /// Needed grade is only worth showing while there is something left to earn.
    pub fn shows_needed_grade(&self) -> bool {
        self.rounded().needed_grade > 0.0
    }

    pub fn has_results(&self) -> bool {
        self.rounded().current_grade > 0.0
    }

    pub fn report_lines(&self) -> Vec<String> {
        let r = self.rounded();
        let mut lines = vec![
            format!("Current Grade: {}%", r.current_grade),
            format!("Total Weight: {}%", r.total_weight),
            format!("Remaining Weight: {}%", r.remaining_weight),
        ];
        if self.shows_needed_grade() {
            lines.push(format!("Needed Grade on Remaining Tasks: {}%", r.needed_grade));
        }
        lines
    }

    pub fn report(&self) -> String {
        self.report_lines().join("\n")
    }
}

// Standalone functions for pure logic

pub fn calculate_total_weight(class: &Class) -> f64 {
    class
        .assignments
        .iter()
        .filter_map(|a| parse_numeric(&a.weight))
        .sum()
}

pub fn calculate_remaining_weight(class: &Class) -> f64 {
    (FULL_WEIGHT - calculate_total_weight(class)).max(0.0)
}

/// Weighted points earned so far.
///
/// Rows missing a grade or weight, or weighted at zero or less, are left out
/// entirely. The result is a sum of `grade * weight / 100`, not an average over
/// the weight actually graded.
pub fn calculate_current_grade(class: &Class) -> f64 {
    let mut total_points = 0.0;
    let mut effective_weight = 0.0;

    for assignment in &class.assignments {
        let grade = parse_numeric(&assignment.grade);
        let weight = parse_numeric(&assignment.weight);
        if let (Some(grade), Some(weight)) = (grade, weight) {
            if weight > 0.0 {
                total_points += grade * weight / FULL_WEIGHT;
                effective_weight += weight;
            }
        }
    }

    if effective_weight > 0.0 {
        total_points
    } else {
        0.0
    }
}

/// Average score required on the remaining weight to reach the final goal.
/// Unclamped: negative means the goal is already met, over 100 means it is out of reach.
pub fn calculate_needed_grade(class: &Class, current_grade: f64, remaining_weight: f64) -> f64 {
    match parse_numeric(&class.final_goal) {
        Some(goal) if remaining_weight > 0.0 => {
            ((goal - current_grade) / remaining_weight) * FULL_WEIGHT
        }
        _ => 0.0,
    }
}

pub fn calculate_grade(class: &Class) -> GradeSummary {
    let total_weight = calculate_total_weight(class);
    let remaining_weight = (FULL_WEIGHT - total_weight).max(0.0);
    let current_grade = calculate_current_grade(class);
    let needed_grade = calculate_needed_grade(class, current_grade, remaining_weight);

    GradeSummary {
        current_grade,
        needed_grade,
        total_weight,
        remaining_weight,
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    // Adding 0.0 folds -0.0 into 0.0 so it never prints as "-0".
    (value * factor).round() / factor + 0.0
}
