use sqlx::PgPool;
use tracing::info;

use crate::dto::module_dto::{CreateModulePayload, CreateSection};
use crate::dto::quiz_dto::{CreateOption, CreateQuestion, CreateQuizPayload};
use crate::error::Result;
use crate::services::module_service::ModuleService;
use crate::services::quiz_service::QuizService;

/// Seeds sample study content on first start so a fresh deployment has
/// something to browse. Runs only when the modules table is empty.
pub async fn seed_sample_content(pool: &PgPool) -> Result<()> {
    let module_service = ModuleService::new(pool.clone());
    let quiz_service = QuizService::new(pool.clone());

    if module_service.count_modules().await? > 0 {
        return Ok(());
    }

    let fundamentals = module_service
        .create_module(CreateModulePayload {
            title: "1. Fundamentals of Testing".to_string(),
            description: "Core testing concepts, terminology and the seven testing principles."
                .to_string(),
            content: "Why testing is necessary, what testing is and is not, and how errors, \
                      defects and failures relate to each other."
                .to_string(),
            sections: vec![
                CreateSection {
                    title: "What is testing?".to_string(),
                    content: "Testing objectives, and the difference between testing and debugging."
                        .to_string(),
                    order: 1,
                },
                CreateSection {
                    title: "The seven testing principles".to_string(),
                    content: "Exhaustive testing is impossible, defects cluster, and the pesticide \
                              paradox."
                        .to_string(),
                    order: 2,
                },
                CreateSection {
                    title: "Errors, defects and failures".to_string(),
                    content: "How a human error becomes a defect in code and a failure at runtime."
                        .to_string(),
                    order: 3,
                },
            ],
            sort_order: 1,
            estimated_time: 45,
            learning_objectives: vec![
                "Explain why testing is necessary".to_string(),
                "Recall the seven testing principles".to_string(),
            ],
            key_concepts: vec!["error".to_string(), "defect".to_string(), "failure".to_string()],
        })
        .await?;

    module_service
        .create_module(CreateModulePayload {
            title: "2. Testing Throughout the Software Lifecycle".to_string(),
            description: "How testing activities fit into different development models."
                .to_string(),
            content: "Test levels and test types across sequential and iterative lifecycles."
                .to_string(),
            sections: vec![
                CreateSection {
                    title: "Test levels".to_string(),
                    content: "Component, integration, system and acceptance testing.".to_string(),
                    order: 1,
                },
                CreateSection {
                    title: "Test types".to_string(),
                    content: "Functional, non-functional, structural and change-related testing."
                        .to_string(),
                    order: 2,
                },
            ],
            sort_order: 2,
            estimated_time: 50,
            learning_objectives: vec![
                "Distinguish test levels from test types".to_string(),
            ],
            key_concepts: vec!["test level".to_string(), "regression testing".to_string()],
        })
        .await?;

    module_service
        .create_module(CreateModulePayload {
            title: "3. Test Design Techniques".to_string(),
            description: "Black-box, white-box and experience-based techniques.".to_string(),
            content: "Designing effective test cases with equivalence partitioning, boundary \
                      value analysis and decision tables."
                .to_string(),
            sections: vec![
                CreateSection {
                    title: "Equivalence partitioning".to_string(),
                    content: "Dividing inputs into classes expected to behave the same."
                        .to_string(),
                    order: 1,
                },
                CreateSection {
                    title: "Boundary value analysis".to_string(),
                    content: "Testing at the edges where defects cluster.".to_string(),
                    order: 2,
                },
            ],
            sort_order: 3,
            estimated_time: 60,
            learning_objectives: vec!["Apply black-box design techniques".to_string()],
            key_concepts: vec![
                "equivalence class".to_string(),
                "boundary value".to_string(),
            ],
        })
        .await?;

    if quiz_service.count_quizzes().await? == 0 {
        quiz_service
            .create_quiz(CreateQuizPayload {
                title: "Fundamentals of Testing: Check Your Knowledge".to_string(),
                description: Some(
                    "Five questions covering the fundamentals module.".to_string(),
                ),
                module_id: Some(fundamentals.id),
                questions: vec![
                    CreateQuestion {
                        text: "Which statement describes a failure?".to_string(),
                        options: vec![
                            CreateOption {
                                text: "A mistake made by a person".to_string(),
                                explanation: Some("That is an error, not a failure.".to_string()),
                            },
                            CreateOption {
                                text: "A flaw in the source code".to_string(),
                                explanation: Some("That is a defect.".to_string()),
                            },
                            CreateOption {
                                text: "A deviation of observed behavior from expected behavior"
                                    .to_string(),
                                explanation: Some(
                                    "A failure is visible at runtime when a defect executes."
                                        .to_string(),
                                ),
                            },
                        ],
                        correct_option: 2,
                    },
                    CreateQuestion {
                        text: "Exhaustive testing is:".to_string(),
                        options: vec![
                            CreateOption {
                                text: "Required for safety-critical systems".to_string(),
                                explanation: None,
                            },
                            CreateOption {
                                text: "Impossible except for trivial cases".to_string(),
                                explanation: Some(
                                    "Testing everything is infeasible; risk guides the effort."
                                        .to_string(),
                                ),
                            },
                        ],
                        correct_option: 1,
                    },
                    CreateQuestion {
                        text: "Defects tend to:".to_string(),
                        options: vec![
                            CreateOption {
                                text: "Spread evenly across a system".to_string(),
                                explanation: None,
                            },
                            CreateOption {
                                text: "Cluster in a small number of modules".to_string(),
                                explanation: Some("The defect clustering principle.".to_string()),
                            },
                        ],
                        correct_option: 1,
                    },
                    CreateQuestion {
                        text: "Testing can show:".to_string(),
                        options: vec![
                            CreateOption {
                                text: "The presence of defects, not their absence".to_string(),
                                explanation: None,
                            },
                            CreateOption {
                                text: "That software is free of defects".to_string(),
                                explanation: None,
                            },
                        ],
                        correct_option: 0,
                    },
                    CreateQuestion {
                        text: "Repeating the same tests over time:".to_string(),
                        options: vec![
                            CreateOption {
                                text: "Keeps finding new defects".to_string(),
                                explanation: None,
                            },
                            CreateOption {
                                text: "Loses effectiveness unless tests evolve".to_string(),
                                explanation: Some("The pesticide paradox.".to_string()),
                            },
                        ],
                        correct_option: 1,
                    },
                ],
                passing_score: 70,
                time_limit: Some(10),
            })
            .await?;
    }

    info!("Sample study modules and quiz created");
    Ok(())
}
