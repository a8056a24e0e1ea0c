use clap::Parser;
use edu_pathway::config::cli::parse_selection;
use edu_pathway::config::{CliConfig, Command, LogFormat, Settings};
use edu_pathway::core::catalog::WithFallback;
use edu_pathway::core::navigation;
use edu_pathway::core::payment::PaymentForm;
use edu_pathway::core::qualification::QualifiedCourse;
use edu_pathway::core::{ConfigProvider, Course, SubjectCatalog};
use edu_pathway::utils::error::ErrorSeverity;
use edu_pathway::utils::{logger, validation::Validate};
use edu_pathway::{FileStore, HttpCatalog, Pathway, Result, SelectedCourses, UserStore};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match cli.load_config().and_then(|config| {
        config.validate()?;
        config.settings()
    }) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match settings.log_format {
        LogFormat::Json => logger::init_json_logger(cli.verbose, settings.log_level.as_deref()),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, settings.log_level.as_deref()),
    }
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let http = HttpCatalog::with_timeout(settings.api_base_url(), settings.request_timeout())?;
    let pathway = Pathway::new(WithFallback::new(http.clone()), http);
    let store = Arc::new(FileStore::new(settings.store_path()));

    match command {
        Command::Subjects => {
            let subjects = pathway.catalog().fetch_subjects().await?;
            for subject in subjects {
                println!("{:<22} {}", subject.value, subject.label);
            }
        }
        Command::Points { subjects } => {
            let selection = parse_selection(&subjects)?;
            for subject in selection.subjects() {
                match selection.grade_of(subject) {
                    Some(grade) => println!("{:<22} {:<3} ({})", subject, grade, grade.points()),
                    None => println!("{:<22} -", subject),
                }
            }
            println!("Total Points: {}", selection.total_points());
            match selection.validate() {
                Ok(()) => println!("✅ Ready to find courses"),
                Err(e) => println!("⚠️ {}", e),
            }
        }
        Command::Find {
            subjects,
            qualified_only,
        } => {
            let selection = parse_selection(&subjects)?;
            let submission = pathway.submit(&selection).await?;
            println!("Your Total Points: {}", submission.total_points);
            println!("Query: {}", submission.query);

            let state = navigation::decode(&submission.query);
            print_courses(&pathway.browse(&state, qualified_only).await?);
        }
        Command::Courses {
            query,
            qualified_only,
        } => {
            let state = navigation::decode(&query);
            if state.points > 0 {
                println!("Your Total Points: {}", state.points);
            }
            print_courses(&pathway.browse(&state, qualified_only).await?);
        }
        Command::Course { id } => {
            let course = pathway.course(&id).await?;
            let registry = SelectedCourses::load(store.clone())?;
            print_course_detail(&course, registry.is_selected(&course.id));
        }
        Command::Select { id } => {
            let mut registry = SelectedCourses::load(store.clone())?;
            if registry.is_selected(&id) {
                println!("Course {} is already in your selected courses", id);
            } else {
                let course = pathway.course(&id).await?;
                registry.add(course.clone())?;
                println!("✅ {} has been added to your selected courses.", course.title);
            }
            if UserStore::new(store.clone()).requires_payment()? {
                println!("💡 Complete payment with `edu-pathway pay` to apply");
            }
        }
        Command::Unselect { id } => {
            let mut registry = SelectedCourses::load(store.clone())?;
            if registry.remove(&id)? {
                println!("Course {} has been removed from your selected courses.", id);
            } else {
                println!("Course {} was not selected", id);
            }
        }
        Command::Toggle { id } => {
            let mut registry = SelectedCourses::load(store.clone())?;
            let course = match registry.list().iter().find(|c| c.id == id) {
                Some(course) => course.clone(),
                None => pathway.course(&id).await?,
            };
            let title = course.title.clone();
            if registry.toggle(course)? {
                println!("✅ {} has been added to your selected courses.", title);
            } else {
                println!("{} has been removed from your selected courses.", title);
            }
        }
        Command::Selected { clear } => {
            let mut registry = SelectedCourses::load(store.clone())?;
            if clear {
                registry.clear()?;
                println!("Selected courses cleared");
            } else if registry.is_empty() {
                println!("No courses selected yet");
            } else {
                for course in registry.list() {
                    println!(
                        "{:<8} {:<45} {:<30} {}",
                        course.id, course.title, course.university, course.required_points
                    );
                }
            }
        }
        Command::Pay { phone, code } => {
            let users = UserStore::new(store.clone());
            let form = PaymentForm::new(&phone, &code);
            form.submit(&users)?;
            println!("✅ Payment confirmed. You can now apply for your selected courses.");
        }
        Command::Status => {
            let users = UserStore::new(store.clone());
            let registry = SelectedCourses::load(store.clone())?;
            let paid = !users.requires_payment()?;
            println!("Payment: {}", if paid { "completed" } else { "pending" });
            println!("Selected courses: {}", registry.len());
        }
    }

    Ok(())
}

fn print_courses(courses: &[QualifiedCourse]) {
    if courses.is_empty() {
        println!("No courses found");
        return;
    }
    println!(
        "{:<8} {:<45} {:<30} {:>6}  {}",
        "ID", "Course Name", "University", "Points", "Qualification"
    );
    for entry in courses {
        let course = &entry.course;
        let mark = if entry.qualification.is_qualified() { "✅" } else { "❌" };
        println!(
            "{:<8} {:<45} {:<30} {:>6}  {} {}",
            course.id, course.title, course.university, course.required_points, mark, entry.qualification
        );
    }
}

fn print_course_detail(course: &Course, selected: bool) {
    println!("{} ({})", course.title, course.code);
    println!("University:      {}", course.university);
    println!("Required points: {}", course.required_points);
    if let Some(duration) = &course.duration {
        println!("Duration:        {}", duration);
    }
    if let Some(start) = &course.start_date {
        println!("Start date:      {}", start);
    }
    if let Some(deadline) = &course.application_deadline {
        println!("Deadline:        {}", deadline);
    }
    if !course.subjects.is_empty() {
        println!("Subjects:        {}", course.subjects.join(", "));
    }
    if !course.campuses.is_empty() {
        println!("Campuses:        {}", course.campuses.join(", "));
    }
    if !course.careers.is_empty() {
        println!("Careers:         {}", course.careers.join(", "));
    }
    if let Some(description) = &course.full_description {
        println!();
        println!("{}", description);
    }
    println!();
    println!("Selected: {}", if selected { "yes" } else { "no" });
}
