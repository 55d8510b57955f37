//! Generate command handler

use degree_planner::config::Config;
use degree_planner::core::catalog::{load_catalog, load_constraints, save_plan};
use degree_planner::core::models::{AcademicPlan, PlanningConstraints, PlanningPreferences};
use degree_planner::{error, generate_plan, info, verbose};
use std::path::{Path, PathBuf};

/// Arguments of `degreeplanner generate`
#[derive(Debug)]
pub struct GenerateRequest {
    /// Catalog JSON file
    pub catalog: PathBuf,
    /// Constraints JSON file
    pub constraints: Option<PathBuf>,
    /// Extra required course codes
    pub required: Vec<String>,
    /// Credit cap overriding the constraints file
    pub max_credits: Option<u16>,
    /// Favor courses with a high historical A-rate
    pub prioritize_grades: bool,
    /// Rebalance overloaded terms after placement
    pub balance_workload: bool,
    /// Favor courses that have required prerequisites
    pub include_requirements: bool,
    /// User id stamped on the plan
    pub user: Option<String>,
    /// Explicit output path
    pub output: Option<PathBuf>,
}

fn catalog_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "catalog".to_string(), |s| s.to_string_lossy().to_string())
}

fn resolve_constraints(request: &GenerateRequest, config: &Config) -> Option<PlanningConstraints> {
    let mut constraints = match &request.constraints {
        Some(path) => match load_constraints(path) {
            Ok(constraints) => constraints,
            Err(e) => {
                error!("{e}");
                eprintln!("✗ {e}");
                return None;
            }
        },
        None => PlanningConstraints {
            max_credits_per_semester: config.planning.max_credits_per_semester,
            ..PlanningConstraints::default()
        },
    };

    if let Some(max_credits) = request.max_credits {
        constraints.max_credits_per_semester = max_credits;
    }
    for code in &request.required {
        constraints.require(code.trim());
    }
    Some(constraints)
}

fn output_path(request: &GenerateRequest, config: &Config) -> PathBuf {
    if let Some(output) = &request.output {
        return output.clone();
    }
    let file_name = format!("{}-plan.json", catalog_stem(&request.catalog));
    if config.paths.plans_dir.is_empty() {
        PathBuf::from(file_name)
    } else {
        Path::new(&config.paths.plans_dir).join(file_name)
    }
}

/// Print the plan term by term, skipping empty terms
pub fn print_plan(plan: &AcademicPlan) {
    println!("\n=== Plan {} ({}) ===", plan.id, plan.user_id);
    for year in &plan.years {
        for semester in year.semesters.iter().filter(|s| !s.courses.is_empty()) {
            println!(
                "\n{} {} ({:.1} credits)",
                semester.term.as_str(),
                semester.year,
                semester.total_credits()
            );
            for planned in &semester.courses {
                let course = &planned.course;
                println!("  {:<10} {:>4.1}  {}", course.code, course.credits, course.name);
            }
        }
    }
    println!(
        "\nTotal: {} courses, {:.1} credits",
        plan.course_count(),
        plan.total_credits()
    );
    if !plan.unplaced.is_empty() {
        println!("Unplaced:");
        for unplaced in &plan.unplaced {
            println!("  {} ({:?})", unplaced.code, unplaced.reason);
        }
    }
}

/// Run the generator and write the plan. Returns `false` on failure or an invalid plan.
pub fn run(request: &GenerateRequest, config: &Config) -> bool {
    let catalog = match load_catalog(&request.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return false;
        }
    };
    verbose!("Loaded {} courses from {}", catalog.len(), request.catalog.display());

    let Some(constraints) = resolve_constraints(request, config) else {
        return false;
    };

    let preferences = PlanningPreferences {
        prioritize_grades: request.prioritize_grades,
        balance_workload: request.balance_workload,
        include_requirements: request.include_requirements,
    };

    let mut settings = config.planner_settings();
    settings.plan_id = format!("{}-plan", catalog_stem(&request.catalog));
    if let Some(user) = &request.user {
        settings.user_id.clone_from(user);
    }

    let generated = match generate_plan(&catalog, &preferences, &constraints, &settings) {
        Ok(generated) => generated,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return false;
        }
    };

    print_plan(&generated.plan);
    println!();
    super::print_validation(&generated.validation);

    let path = output_path(request, config);
    if let Err(e) = save_plan(&generated.plan, &path) {
        error!("{e}");
        eprintln!("✗ {e}");
        return false;
    }
    info!("Plan written to {}", path.display());
    println!("✓ Plan saved: {}", path.display());

    generated.validation.valid
}
