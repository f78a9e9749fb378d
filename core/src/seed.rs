//! Demo data for a fresh store.

use tracing::{debug, info, warn};

use crate::error::TodoError;
use crate::service::TodoService;
use crate::types::{ItemFields, ListFields};

const SEED: &[(&str, &[(&str, &str)])] = &[
    (
        "Setup Rails Application",
        &[
            (
                "Install Rails Gem",
                "Use gem command to install the latest version of Ruby on Rails framework.",
            ),
            (
                "Generate New Rails App",
                "Use the rails new command followed by the desired application name to generate a new Rails application.",
            ),
            (
                "Setup Database Configuration",
                "Configure the config/database.yml file to specify the database connection details for development, test, and production environments.",
            ),
        ],
    ),
    (
        "Setup Docker PG database",
        &[
            ("Install Docker", "Download and install Docker on your system."),
            (
                "Pull PostgreSQL image",
                "Pull the official PostgreSQL Docker image from Docker Hub.",
            ),
            (
                "Run PostgreSQL container",
                "Create and run a Docker container for PostgreSQL using the pulled image.",
            ),
        ],
    ),
    (
        "Create todo_lists table",
        &[
            (
                "Generate migration file",
                "Run the Rails generator to create a migration file for the todo_lists table.",
            ),
            (
                "Define table structure",
                "Write the migration file to define the structure of the todo_lists table.",
            ),
            (
                "Run migration",
                "Execute the migration file to create the todo_lists table in the database.",
            ),
        ],
    ),
    (
        "Create TodoList model",
        &[
            (
                "Generate model file",
                "Use the Rails generator to create a model file for the TodoList model.",
            ),
            (
                "Define model attributes",
                "Define the attributes and associations for the TodoList model in the generated file.",
            ),
            (
                "Validate model constraints",
                "Add validations to the TodoList model file to ensure data integrity.",
            ),
        ],
    ),
    (
        "Create TodoList controller",
        &[
            (
                "Generate controller file",
                "Use the Rails generator to create a controller file for the TodoList controller.",
            ),
            (
                "Define controller actions",
                "Define CRUD actions (create, read, update, delete) in the TodoList controller file.",
            ),
            (
                "Setup routes",
                "Configure routes.rb to map HTTP requests to the appropriate actions in the TodoList controller.",
            ),
        ],
    ),
];

/// Load the demo lists and their items. Lists whose name is already taken
/// are skipped, so loading twice is harmless. Items the configured rules
/// reject are skipped with a warning. Returns the number of lists created.
pub async fn load(service: &TodoService) -> Result<usize, TodoError> {
    let mut created = 0;
    for (name, items) in SEED {
        let list = match service.create_list(ListFields::new(*name)).await {
            Ok(list) => list,
            Err(TodoError::Validation(_)) => {
                debug!(list = *name, "seed list already present, skipping");
                continue;
            }
            Err(err) => return Err(err),
        };
        for (item_name, description) in items.iter() {
            let fields = ItemFields::new(*item_name, *description);
            match service.create_item(&list, fields).await {
                Ok(_) => {}
                Err(TodoError::Validation(violations)) => {
                    warn!(list = *name, item = *item_name, %violations, "skipping seed item");
                }
                Err(err) => return Err(err),
            }
        }
        created += 1;
    }
    info!(created, "seed data loaded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ItemRules;

    #[tokio::test]
    async fn load_creates_every_list_with_items() {
        let service = TodoService::in_memory(ItemRules::default());
        assert_eq!(load(&service).await.unwrap(), 5);

        let lists = service.lists().await.unwrap();
        assert_eq!(lists.len(), 5);
        for list in &lists {
            assert_eq!(service.items(list).await.unwrap().len(), 3);
        }
    }

    #[tokio::test]
    async fn load_is_idempotent() {
        let service = TodoService::in_memory(ItemRules::default());
        load(&service).await.unwrap();
        assert_eq!(load(&service).await.unwrap(), 0);
        assert_eq!(service.lists().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn load_skips_items_over_a_tighter_limit() {
        let service = TodoService::in_memory(ItemRules::with_name_max_length(25));
        assert_eq!(load(&service).await.unwrap(), 5);

        let mut names = Vec::new();
        for list in service.lists().await.unwrap() {
            for item in service.items(&list).await.unwrap() {
                names.push(item.name);
            }
        }
        assert_eq!(names.len(), 13);
        assert!(!names.iter().any(|n| n == "Setup Database Configuration"));
        assert!(!names.iter().any(|n| n == "Validate model constraints"));
        assert!(names.iter().any(|n| n == "Define controller actions"));
    }

    #[test]
    fn seed_item_names_fit_the_default_limit() {
        for (_, items) in SEED {
            for (name, _) in items.iter() {
                assert!(
                    name.chars().count() <= crate::validation::DEFAULT_ITEM_NAME_MAX_LENGTH,
                    "{name} is too long"
                );
            }
        }
    }
}
