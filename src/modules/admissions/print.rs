//! Printable application form. The browser's print dialog turns it into
//! paper or PDF.

use crate::utils::html::{escape_html, escape_multiline};

use super::model::Admission;

fn grade_label(grade: &str) -> &str {
    match grade {
        "m1" => "Mathayom 1 (M.1)",
        "m4" => "Mathayom 4 (M.4)",
        other => other,
    }
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><th>{}</th><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
}

pub fn render_application(
    admission: &Admission,
    program_name: Option<&str>,
    school_name: &str,
) -> String {
    let student = [
        row("Name", &admission.student_full_name()),
        row("National ID", &admission.student_id_card),
        row(
            "Birth date",
            &admission.student_birth_date.format("%d/%m/%Y").to_string(),
        ),
        row("Gender", &admission.student_gender),
        row("Phone", &admission.student_phone),
        row("Address", &admission.student_address),
    ]
    .concat();

    let parent = [
        row("Name", &admission.parent_name),
        row("Relationship", &admission.parent_relationship),
        row("Phone", &admission.parent_phone),
        row("Email", &admission.parent_email),
        row(
            "Occupation",
            admission.parent_occupation.as_deref().unwrap_or("-"),
        ),
    ]
    .concat();

    let academic = [
        row("Previous school", &admission.previous_school),
        row("Previous grade", &admission.previous_grade),
        row("GPA", &format!("{:.2}", admission.gpa)),
        row("Applying for", grade_label(&admission.applying_grade)),
        row("Program", program_name.unwrap_or("-")),
    ]
    .concat();

    let notes = admission
        .notes
        .as_deref()
        .map(|n| format!("<h2>Reviewer notes</h2><p>{}</p>", escape_multiline(n)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Application {reference}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; color: #111827; }}
  header {{ display: flex; justify-content: space-between; align-items: baseline; }}
  table {{ width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }}
  th, td {{ text-align: left; padding: 6px 8px; border-bottom: 1px solid #e5e7eb; }}
  th {{ width: 30%; color: #4b5563; font-weight: 600; }}
  @media print {{ body {{ margin: 0; }} }}
</style>
</head>
<body onload="window.print()">
<header>
  <h1>{school} enrollment application</h1>
  <div>
    <div><strong>Reference:</strong> {reference}</div>
    <div><strong>Status:</strong> {status}</div>
    <div><strong>Submitted:</strong> {submitted}</div>
  </div>
</header>
<h2>Student</h2>
<table>{student}</table>
<h2>Parent or guardian</h2>
<table>{parent}</table>
<h2>Academic background</h2>
<table>{academic}</table>
{notes}
</body>
</html>"#,
        school = escape_html(school_name),
        reference = escape_html(&admission.reference_number),
        status = escape_html(admission.status.label()),
        submitted = admission.created_at.format("%d/%m/%Y %H:%M"),
        student = student,
        parent = parent,
        academic = academic,
        notes = notes,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::modules::admissions::model::AdmissionStatus;

    fn admission() -> Admission {
        Admission {
            id: Uuid::new_v4(),
            reference_number: "ADM-2025-00042".to_string(),
            student_prefix: "Miss".to_string(),
            student_first_name: "<script>alert(1)</script>".to_string(),
            student_last_name: "Sukjai".to_string(),
            student_id_card: "1103700012345".to_string(),
            student_birth_date: NaiveDate::from_ymd_opt(2012, 5, 1).unwrap(),
            student_gender: "female".to_string(),
            student_phone: "0812345678".to_string(),
            student_address: "1 Moo 2".to_string(),
            parent_name: "Somchai Sukjai".to_string(),
            parent_relationship: "father".to_string(),
            parent_phone: "0898765432".to_string(),
            parent_email: "parent@example.com".to_string(),
            parent_occupation: None,
            previous_school: "Ban Nong School".to_string(),
            previous_grade: "P.6".to_string(),
            gpa: 3.5,
            applying_grade: "m1".to_string(),
            program_id: None,
            status: AdmissionStatus::Reviewing,
            notes: Some("Call & confirm\nbefore interview".to_string()),
            reviewed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render_application(&admission(), Some("Science & Math"), "Demo School");

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("Science &amp; Math"));
        assert!(html.contains("Call &amp; confirm<br>before interview"));
    }

    #[test]
    fn test_render_labels() {
        let html = render_application(&admission(), None, "Demo School");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("ADM-2025-00042"));
        assert!(html.contains("Mathayom 1 (M.1)"));
        assert!(html.contains("Under review"));
        assert!(html.contains("3.50"));
    }
}
