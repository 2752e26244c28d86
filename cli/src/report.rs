use gradebook_core::service::grade_calc::calculate_grade;
use gradebook_core::{Class, ClassDto};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "#")]
    position: String,
    #[tabled(rename = "Class")]
    name: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Total Weight")]
    total_weight: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Current Grade")]
    current: String,
}

#[derive(Tabled)]
struct AssignmentRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Assignment/Exam")]
    name: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

// Ids are opaque text, so cut on characters rather than bytes.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub fn class_table(dtos: &[ClassDto]) -> String {
    let rows: Vec<ClassRow> = dtos
        .iter()
        .map(|dto| {
            let summary = dto.summary.rounded();
            let position = if dto.is_active {
                format!("{}*", dto.position)
            } else {
                dto.position.to_string()
            };
            ClassRow {
                position,
                name: dto.name.clone(),
                rows: dto.assignment_count,
                goal: or_dash(&dto.final_goal),
                total_weight: format!("{}%", summary.total_weight),
                remaining: format!("{:.1}%", summary.remaining_weight),
                current: format!("{}%", summary.current_grade),
            }
        })
        .collect();

    Table::new(&rows)
        .with(Style::modern())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string()
}

pub fn assignment_table(class: &Class) -> String {
    let rows: Vec<AssignmentRow> = class
        .assignments
        .iter()
        .enumerate()
        .map(|(i, a)| AssignmentRow {
            position: i + 1,
            name: or_dash(&a.name),
            grade: or_dash(&a.grade),
            weight: or_dash(&a.weight),
            id: short_id(&a.id),
        })
        .collect();

    Table::new(&rows).with(Style::modern()).to_string()
}

pub fn class_report(class: &Class) -> String {
    let summary = calculate_grade(class);
    let mut out = format!("{} (goal: {})\n", class.name, or_dash(&class.final_goal));
    out.push_str(&assignment_table(class));
    out.push('\n');
    out.push_str(&summary.report());
    out
}
