//! Graph command handler

use degree_planner::core::catalog::load_catalog;
use degree_planner::core::models::DAG;
use degree_planner::error;
use std::path::Path;

/// Print the prerequisite graph. Returns `false` when the catalog is unreadable or cyclic.
pub fn run(catalog_path: &Path) -> bool {
    let catalog = match load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return false;
        }
    };

    let dag = DAG::from_courses(&catalog);
    print!("{dag}");

    match dag.ensure_acyclic() {
        Ok(()) => {
            println!("\n✓ No prerequisite cycles");
            true
        }
        Err(e) => {
            eprintln!("\n✗ {e}");
            false
        }
    }
}
