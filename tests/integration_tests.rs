// Integration tests for Skill Match

use skill_match::core::MatchOutcome;
use skill_match::models::{ExperienceLevel, Personnel, ProficiencyLevel, Skill};
use skill_match::services::{match_project_to_personnel, InMemoryStore, MatchError};

const RUST: i64 = 1;
const POSTGRES: i64 = 2;
const KUBERNETES: i64 = 3;

const PLATFORM_PROJECT: i64 = 100;
const EMPTY_PROJECT: i64 = 200;
const RUST_ONLY_PROJECT: i64 = 300;

fn level(n: u8) -> ProficiencyLevel {
    ProficiencyLevel::new(n).unwrap()
}

fn create_test_personnel(id: i64, name: &str, experience_level: ExperienceLevel) -> Personnel {
    Personnel {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: "Engineer".to_string(),
        experience_level,
    }
}

fn create_test_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();

    for (id, name, category) in [
        (RUST, "Rust", "Language"),
        (POSTGRES, "PostgreSQL", "Database"),
        (KUBERNETES, "Kubernetes", "Infrastructure"),
    ] {
        store.add_skill(Skill {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: None,
        });
    }

    store
        .add_personnel(create_test_personnel(1, "Xavier", ExperienceLevel::Senior))
        .add_personnel(create_test_personnel(2, "Yara", ExperienceLevel::MidLevel))
        .add_personnel(create_test_personnel(3, "Zoe", ExperienceLevel::Junior))
        .add_personnel(create_test_personnel(4, "Wes", ExperienceLevel::Senior))
        .add_personnel(create_test_personnel(5, "Vik", ExperienceLevel::MidLevel));

    // Xavier: A@5, B@4 -> qualifies at 90
    store.set_person_skill(1, RUST, level(5)).set_person_skill(1, POSTGRES, level(4));
    // Yara: A@2, B@5 -> below minimum on Rust
    store.set_person_skill(2, RUST, level(2)).set_person_skill(2, POSTGRES, level(5));
    // Zoe: no Rust at all
    store.set_person_skill(3, POSTGRES, level(5)).set_person_skill(3, KUBERNETES, level(5));
    // Wes and Vik tie at 80
    store.set_person_skill(4, RUST, level(4)).set_person_skill(4, POSTGRES, level(4));
    store.set_person_skill(5, RUST, level(3)).set_person_skill(5, POSTGRES, level(5));

    store
        .require_skill(PLATFORM_PROJECT, RUST, level(3))
        .require_skill(PLATFORM_PROJECT, POSTGRES, level(2))
        .add_project(EMPTY_PROJECT)
        .require_skill(RUST_ONLY_PROJECT, RUST, level(1));

    store
}

#[tokio::test]
async fn test_integration_end_to_end_matching() {
    let store = create_test_store();

    let result = match_project_to_personnel(&store, PLATFORM_PROJECT).await.unwrap();

    assert_eq!(result.outcome, MatchOutcome::Evaluated);
    assert_eq!(result.total_candidates, 5);

    let ranked: Vec<(&str, u8)> = result
        .matches
        .iter()
        .map(|m| (m.personnel.name.as_str(), m.match_percentage))
        .collect();
    assert_eq!(ranked, vec![("Xavier", 90), ("Wes", 80), ("Vik", 80)]);

    let xavier = &result.matches[0];
    assert_eq!(xavier.matched_skills.len(), 2);
    assert_eq!(xavier.matched_skills[0].skill_name, "Rust");
    assert_eq!(xavier.matched_skills[0].required_level, level(3));
    assert_eq!(xavier.matched_skills[0].actual_level, level(5));
    assert_eq!(xavier.matched_skills[1].skill_name, "PostgreSQL");

    let required: Vec<&str> = result.required_skills.iter().map(|r| r.skill_name.as_str()).collect();
    assert_eq!(required, vec!["Rust", "PostgreSQL"]);
}

#[tokio::test]
async fn test_no_requirements_is_distinct_from_no_matches() {
    let store = create_test_store();

    let empty = match_project_to_personnel(&store, EMPTY_PROJECT).await.unwrap();
    assert_eq!(empty.outcome, MatchOutcome::NoRequirements);
    assert!(empty.matches.is_empty());

    let mut nobody = create_test_store();
    nobody.require_skill(EMPTY_PROJECT + 1, KUBERNETES, level(5)).require_skill(
        EMPTY_PROJECT + 1,
        RUST,
        level(5),
    );
    let none = match_project_to_personnel(&nobody, EMPTY_PROJECT + 1).await.unwrap();
    assert_eq!(none.outcome, MatchOutcome::Evaluated);
    assert!(none.matches.is_empty());
}

#[tokio::test]
async fn test_missing_skill_is_not_an_error() {
    let store = create_test_store();

    let result = match_project_to_personnel(&store, RUST_ONLY_PROJECT).await.unwrap();

    // Zoe has no Rust record and is simply absent
    assert!(result.matches.iter().all(|m| m.personnel.name != "Zoe"));
    assert_eq!(result.matches.len(), 4);
    // Single requirement: percentage is 20 per level
    assert_eq!(result.matches[0].match_percentage, 100);
    assert_eq!(result.matches.last().unwrap().match_percentage, 40);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let store = create_test_store();

    let first = match_project_to_personnel(&store, PLATFORM_PROJECT).await.unwrap();
    let second = match_project_to_personnel(&store, PLATFORM_PROJECT).await.unwrap();

    assert_eq!(first.matches, second.matches);
    assert_eq!(first.required_skills, second.required_skills);
}

#[tokio::test]
async fn test_unknown_project_is_reported() {
    let store = create_test_store();

    let err = match_project_to_personnel(&store, 9999).await.unwrap_err();

    assert!(matches!(err, MatchError::ProjectNotFound(9999)));
    assert_eq!(err.to_string(), "Project 9999 not found");
}

#[test]
fn test_matching_from_sync_context() {
    let store = create_test_store();

    let result = tokio_test::block_on(match_project_to_personnel(&store, PLATFORM_PROJECT)).unwrap();

    assert_eq!(result.matches.len(), 3);
}
