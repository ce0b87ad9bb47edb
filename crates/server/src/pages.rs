//! Server-rendered HTML. Every page is one card inside the shared layout.

use std::{borrow::Cow, fmt::Write as _};

use server_api::OnboardingRow;
use shared::domain::RegistrySummary;

const STYLE: &str = include_str!("../web/style.css");

const NAV_LINKS: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/registration", "Registration"),
    ("/onboarding", "Onboarding"),
    ("/modules", "Modules"),
    ("/schedule", "Schedule"),
    ("/resources", "Resources"),
    ("/assessments", "Assessments"),
    ("/contact", "Contact"),
];

const LEARNING_MODULES: [(&str, &str); 2] = [
    (
        "A360 Learning",
        "https://www.automationanywhere.com/products/robotic-process-automation",
    ),
    ("Python Learning", "https://www.learnpython.org/"),
];

const SCHEDULE_TOPICS: [&str; 10] = [
    "Intro to A360",
    "A360 Interface",
    "Bot Creation",
    "Recorder & Packages",
    "Logic & Variables",
    "Bot Deployment",
    "Python Basics",
    "Control Flow",
    "Functions",
    "Python & A360",
];

const ASSESSMENT_TASKS: [&str; 9] = [
    "Shopping Cart App",
    "Customer Onboarding",
    "Salary Automation",
    "Employee Extraction",
    "Bonafide Info Extraction",
    "Multiple File Parser",
    "Lock Breaker Challenge",
    "Save the World Task",
    "Web to Excel Data Sync",
];

const CONTACTS: [(&str, &str); 3] = [
    ("Priyadharsini", "90256XXXXX"),
    ("Yuvaraj", "87109XXXXX"),
    ("Rajesh", "78965XXXXX"),
];

pub fn layout(title: &str, content: &str) -> String {
    let title = escape(title);
    let mut nav = String::new();
    for (href, label) in NAV_LINKS {
        let _ = write!(nav, "<a href='{href}'>{label}</a>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang='en'>\n<head>\n<meta charset='UTF-8'>\n\
         <title>Interns Guide - {title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <header>Interns Guide</header>\n<nav>{nav}</nav>\n\
         <section>\n<div class='card'>\n<h2>{title}</h2>\n{content}\n</div>\n</section>\n\
         </body>\n</html>\n"
    )
}

pub fn dashboard(summary: RegistrySummary) -> String {
    let content = format!(
        "<p><strong>Total Trained Interns:</strong> {}</p>\n\
         <p><strong>In Progress:</strong> {}</p>\n\
         <p><strong>Completed:</strong> {}</p>",
        summary.total, summary.in_progress, summary.completed
    );
    layout("Dashboard", &content)
}

pub fn registration_form() -> String {
    let content = "<form method='post'>\n\
        Name:<br><input type='text' name='name' required><br>\n\
        Email:<br><input type='email' name='email' required><br>\n\
        Department:<br><input type='text' name='dept' required><br>\n\
        <input type='submit' value='Register'>\n\
        </form>";
    layout("Register Intern", content)
}

pub fn onboarding(rows: &[OnboardingRow]) -> String {
    let mut content =
        String::from("<table>\n<tr><th>Name</th><th>Department</th><th>Status</th></tr>\n");
    for row in rows {
        let _ = writeln!(
            content,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            escape(&row.department),
            row.status
        );
    }
    content.push_str("</table>");
    layout("Onboarding Status", &content)
}

pub fn modules() -> String {
    let mut content = String::from("<ul>\n");
    for (label, href) in LEARNING_MODULES {
        let _ = writeln!(content, "<li><a href='{href}' target='_blank'>{label}</a></li>");
    }
    content.push_str("</ul>");
    layout("Learning Modules", &content)
}

pub fn schedule() -> String {
    let mut content = String::from("<table><tr><th>Day</th><th>Topic</th></tr>");
    for (day, topic) in SCHEDULE_TOPICS.iter().enumerate() {
        let _ = write!(
            content,
            "<tr><td>Day {}</td><td>{}</td></tr>",
            day + 1,
            escape(topic)
        );
    }
    content.push_str("</table>");
    layout("10-Day Schedule", &content)
}

pub fn resources() -> String {
    layout(
        "Training Resources",
        "<p>Resource materials will be updated here during the training sessions.</p>",
    )
}

pub fn assessments() -> String {
    let mut content = String::from("<ol>\n");
    for task in ASSESSMENT_TASKS {
        let _ = writeln!(content, "<li>{task}</li>");
    }
    content.push_str("</ol>");
    layout("Assessment Tasks", &content)
}

pub fn contact() -> String {
    let mut content = String::new();
    for (name, phone) in CONTACTS {
        let _ = writeln!(content, "<p>{name} - {phone}</p>");
    }
    layout("Contact Us", &content)
}

pub fn not_found(path: &str) -> String {
    let content = format!("<p>No page at <code>{}</code>.</p>", escape(path));
    layout("Page Not Found", &content)
}

pub fn error_page(title: &str, message: &str) -> String {
    let content = format!("<p class='error'>{}</p>", escape(message));
    layout(title, &content)
}

pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::InternStatus;

    #[test]
    fn layout_links_every_page() {
        let html = layout("Dashboard", "");
        assert!(html.contains("<title>Interns Guide - Dashboard</title>"));
        for (href, _) in NAV_LINKS {
            assert!(html.contains(&format!("href='{href}'")), "missing {href}");
        }
    }

    #[test]
    fn schedule_numbers_days_from_one() {
        let html = schedule();
        assert!(html.contains("<td>Day 1</td><td>Intro to A360</td>"));
        assert!(html.contains("<td>Day 10</td><td>Python &amp; A360</td>"));
    }

    #[test]
    fn onboarding_escapes_user_text() {
        let html = onboarding(&[OnboardingRow {
            name: "<b>Eve</b>".into(),
            department: "R&D".into(),
            status: InternStatus::InProgress,
        }]);
        assert!(html.contains("<td>&lt;b&gt;Eve&lt;/b&gt;</td><td>R&amp;D</td><td>In Progress</td>"));
    }

    #[test]
    fn escape_borrows_plain_text() {
        assert!(matches!(escape("June"), Cow::Borrowed("June")));
    }
}
