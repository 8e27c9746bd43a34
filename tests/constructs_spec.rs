use chrono::{TimeZone, Utc};
use evidently_constructs::constructs::*;
use evidently_constructs::models::*;
use evidently_constructs::{Error, Stack, Token};
use serde_json::{json, Value};
use speculate2::speculate;

const PROJECT_ARN: &str = "arn:aws:evidently:us-east-1:123456789012:project/my-project";

fn properties(stack: &Stack, logical_id: &str) -> Value {
    let template = stack.to_template().expect("Failed to render template");
    template["Resources"][logical_id]["Properties"].clone()
}

fn metric_goal(metric_name: &str) -> MetricGoal {
    MetricGoal {
        desired_change: DesiredChange::Increase,
        entity_id_key: "$.details.userId".to_string(),
        event_pattern: r#"{"userDetails":{"userId":[{"exists":true}]}}"#.to_string(),
        metric_name: metric_name.to_string(),
        value_key: "$.details.value".to_string(),
        unit_label: None,
    }
}

fn create_test_feature(stack: &mut Stack, project: &Project) -> Feature {
    Feature::new(
        stack,
        "Feature",
        FeatureProps::new(
            "checkout",
            project,
            vec![
                Variation::boolean("enabled", true),
                Variation::boolean("disabled", false),
            ],
        ),
    )
    .expect("Failed to create feature")
}

speculate! {
    before {
        let mut stack = Stack::new("TestStack");
        let project = Project::new(&mut stack, "Project", ProjectProps::new("myProject"))
            .expect("Failed to create project");
    }

    describe "project" {
        it "renders name and leaves description absent" {
            assert_eq!(project.name(), "myProject");
            assert_eq!(project.arn(), &Token::get_att("Project", "Arn"));
            assert_eq!(properties(&stack, "Project"), json!({ "Name": "myProject" }));
        }

        it "renders a log group destination" {
            Project::new(
                &mut stack,
                "Logged",
                ProjectProps::new("logged")
                    .with_description("Evaluations go to logs")
                    .with_data_delivery(DataDelivery::log_group("evidently-events")),
            ).expect("Failed to create project");

            assert_eq!(properties(&stack, "Logged"), json!({
                "Name": "logged",
                "Description": "Evaluations go to logs",
                "DataDelivery": { "LogGroup": "evidently-events" }
            }));
        }

        it "renders an S3 destination with prefix" {
            Project::new(
                &mut stack,
                "Stored",
                ProjectProps::new("stored")
                    .with_data_delivery(DataDelivery::s3("events-bucket", Some("evidently/".to_string()))),
            ).expect("Failed to create project");

            assert_eq!(
                properties(&stack, "Stored")["DataDelivery"],
                json!({ "S3": { "BucketName": "events-bucket", "Prefix": "evidently/" } })
            );
        }

        it "renders tags as a key value list" {
            Project::new(
                &mut stack,
                "Tagged",
                ProjectProps::new("tagged").with_tag("team", "growth").with_tag("env", "dev"),
            ).expect("Failed to create project");

            assert_eq!(
                properties(&stack, "Tagged")["Tags"],
                json!([{ "Key": "env", "Value": "dev" }, { "Key": "team", "Value": "growth" }])
            );
        }

        it "rejects a second resource with the same id" {
            let result = Project::new(&mut stack, "Project", ProjectProps::new("other"));
            assert!(matches!(result, Err(Error::DuplicateLogicalId(_))));
            assert_eq!(stack.len(), 1);
        }

        it "imports by ARN without registering anything" {
            let imported = Project::from_project_arn(PROJECT_ARN).expect("Import failed");
            assert_eq!(imported.name(), "my-project");
            assert_eq!(imported.arn().as_literal(), Some(PROJECT_ARN));
            assert!(imported.is_imported());
            assert_eq!(stack.len(), 1);
        }

        it "imports by name using the stack environment" {
            let stack = Stack::new("Other").with_env("111122223333", "eu-west-1");
            let imported = Project::from_project_name(&stack, "legacy");
            assert_eq!(
                imported.arn().as_literal(),
                Some("arn:aws:evidently:eu-west-1:111122223333:project/legacy")
            );
        }

        it "rejects a malformed ARN" {
            assert!(matches!(Project::from_project_arn("my-project"), Err(Error::InvalidArn(_))));
        }
    }

    describe "feature" {
        it "renders the end to end string variation" {
            let feature = Feature::new(
                &mut stack,
                "NewFeature",
                FeatureProps::new(
                    "newFeature",
                    &project,
                    vec![Variation::string("defaultVariation", "foobar")],
                ),
            ).expect("Failed to create feature");

            assert_eq!(feature.name(), "newFeature");
            assert_eq!(properties(&stack, "NewFeature"), json!({
                "Name": "newFeature",
                "Project": { "Fn::GetAtt": ["Project", "Arn"] },
                "Variations": [{ "VariationName": "defaultVariation", "StringValue": "foobar" }]
            }));
        }

        it "fails with no variations and registers nothing" {
            let result = Feature::new(
                &mut stack,
                "Empty",
                FeatureProps::new("empty", &project, vec![]),
            );
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
            assert!(stack.resource("Empty").is_none());
        }

        it "rejects non finite double variations" {
            for (id, value) in [("NotANumber", f64::NAN), ("Infinite", f64::INFINITY)] {
                let result = Feature::new(
                    &mut stack,
                    id,
                    FeatureProps::new(id, &project, vec![Variation::double("x", value)]),
                );
                assert!(matches!(result, Err(Error::InvalidArgument(_))));
                assert!(stack.resource(id).is_none());
            }
        }

        it "renders one value field per variation type" {
            Feature::new(
                &mut stack,
                "Typed",
                FeatureProps::new(
                    "typed",
                    &project,
                    vec![
                        Variation::boolean("b", true),
                        Variation::double("d", 0.5),
                        Variation::long("l", 7),
                        Variation::new("unnamed"),
                    ],
                ),
            ).expect("Failed to create feature");

            assert_eq!(properties(&stack, "Typed")["Variations"], json!([
                { "VariationName": "b", "BooleanValue": true },
                { "VariationName": "d", "DoubleValue": 0.5 },
                { "VariationName": "l", "LongValue": 7 },
                { "StringValue": "unnamed" }
            ]));
        }

        it "passes entity overrides and optional fields through unchecked" {
            Feature::new(
                &mut stack,
                "Overridden",
                FeatureProps::new("overridden", "external-project", vec![Variation::boolean("on", true)])
                    .with_entity_overrides(vec![EntityOverride::new("user-1", "missing")])
                    .with_description("Has overrides")
                    .with_evaluation_strategy(EvaluationStrategy::AllRules)
                    .with_default_variation("on"),
            ).expect("Failed to create feature");

            let props = properties(&stack, "Overridden");
            assert_eq!(props["Project"], json!("external-project"));
            assert_eq!(props["EntityOverrides"], json!([{ "EntityId": "user-1", "Variation": "missing" }]));
            assert_eq!(props["Description"], json!("Has overrides"));
            assert_eq!(props["EvaluationStrategy"], json!("ALL_RULES"));
            assert_eq!(props["DefaultVariation"], json!("on"));
        }

        it "looks up variations by name" {
            let feature = create_test_feature(&mut stack, &project);
            assert_eq!(feature.variations().len(), 2);
            assert_eq!(feature.variation("disabled").map(Variation::value), Some(&VariationValue::Boolean(false)));
            assert!(feature.variation("missing").is_none());
        }

        it "imports by attributes" {
            let arn = "arn:aws:evidently:us-east-1:123456789012:project/my-project/feature/checkout";
            let feature = Feature::from_feature_attributes(FeatureAttributes {
                feature_arn: arn.to_string(),
                variations: vec![Variation::boolean("on", true)],
            }).expect("Import failed");

            assert_eq!(feature.name(), "checkout");
            assert_eq!(feature.arn().as_literal(), Some(arn));
            assert_eq!(feature.project().and_then(ProjectRef::as_literal), Some("my-project"));
            assert_eq!(feature.variations().len(), 1);
            assert!(feature.is_imported());
        }
    }

    describe "experiment" {
        it "renders the end to end ab config" {
            let feature = create_test_feature(&mut stack, &project);
            let enabled = feature.variation("enabled").cloned().expect("variation");

            Experiment::new(
                &mut stack,
                "Experiment",
                ExperimentProps::new(
                    "experiment",
                    &project,
                    vec![metric_goal("clicks")],
                    OnlineAbConfig::new("defaultTreatment").with_weight("defaultTreatment", 20000),
                    vec![TreatmentConfig::new("defaultTreatment", &feature, &enabled)],
                ),
            ).expect("Failed to create experiment");

            let props = properties(&stack, "Experiment");
            assert_eq!(props["OnlineAbConfig"], json!({
                "ControlTreatmentName": "defaultTreatment",
                "TreatmentWeights": [{ "SplitWeight": 20000, "Treatment": "defaultTreatment" }]
            }));
            assert_eq!(props["Treatments"], json!([{
                "Feature": "checkout",
                "TreatmentName": "defaultTreatment",
                "Variation": "enabled"
            }]));
        }

        it "accepts three metric goals and keeps their order" {
            Experiment::new(
                &mut stack,
                "ThreeGoals",
                ExperimentProps::new(
                    "three",
                    &project,
                    vec![metric_goal("a"), metric_goal("b"), MetricGoal {
                        desired_change: DesiredChange::Decrease,
                        unit_label: Some("ms".to_string()),
                        ..metric_goal("c")
                    }],
                    OnlineAbConfig::default(),
                    vec![],
                ),
            ).expect("Failed to create experiment");

            let goals = properties(&stack, "ThreeGoals")["MetricGoals"].clone();
            assert_eq!(goals.as_array().map(Vec::len), Some(3));
            assert_eq!(goals[0]["MetricName"], json!("a"));
            assert_eq!(goals[2], json!({
                "DesiredChange": "DECREASE",
                "EntityIdKey": "$.details.userId",
                "EventPattern": r#"{"userDetails":{"userId":[{"exists":true}]}}"#,
                "MetricName": "c",
                "ValueKey": "$.details.value",
                "UnitLabel": "ms"
            }));
        }

        it "fails with four metric goals" {
            let result = Experiment::new(
                &mut stack,
                "FourGoals",
                ExperimentProps::new(
                    "four",
                    &project,
                    vec![metric_goal("a"), metric_goal("b"), metric_goal("c"), metric_goal("d")],
                    OnlineAbConfig::default(),
                    vec![],
                ),
            );
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
            assert!(stack.resource("FourGoals").is_none());
        }

        it "renders string and handle treatments identically" {
            let feature = create_test_feature(&mut stack, &project);
            let enabled = feature.variation("enabled").cloned().expect("variation");

            for (id, treatment) in [
                ("ByHandle", TreatmentConfig::new("t", &feature, &enabled)),
                ("ByName", TreatmentConfig::new("t", "checkout", "enabled")),
            ] {
                Experiment::new(
                    &mut stack,
                    id,
                    ExperimentProps::new(id, &project, vec![], OnlineAbConfig::new("t"), vec![treatment]),
                ).expect("Failed to create experiment");
            }

            let by_handle = properties(&stack, "ByHandle")["Treatments"].clone();
            assert_eq!(by_handle, properties(&stack, "ByName")["Treatments"]);
            assert_eq!(by_handle, json!([
                { "TreatmentName": "t", "Feature": "checkout", "Variation": "enabled" }
            ]));
        }

        it "renders sampling rate and salt" {
            Experiment::new(
                &mut stack,
                "Sampled",
                ExperimentProps::new("sampled", &project, vec![], OnlineAbConfig::default(), vec![])
                    .with_sampling_rate(50000)
                    .with_randomization_salt("salt"),
            ).expect("Failed to create experiment");

            let props = properties(&stack, "Sampled");
            assert_eq!(props["SamplingRate"], json!(50000));
            assert_eq!(props["RandomizationSalt"], json!("salt"));
            assert_eq!(props["OnlineAbConfig"], json!({}));
            assert!(props.get("Description").is_none());
        }

        it "imports by ARN" {
            let arn = "arn:aws:evidently:us-east-1:123456789012:project/my-project/experiment/exp-1";
            let experiment = Experiment::from_experiment_arn(arn).expect("Import failed");
            assert_eq!(experiment.name(), "exp-1");
            assert_eq!(experiment.arn().as_literal(), Some(arn));
            assert!(experiment.treatments().is_empty());
        }
    }

    describe "launch" {
        it "renders groups by name and steps in order" {
            let feature = create_test_feature(&mut stack, &project);
            let enabled = feature.variation("enabled").cloned().expect("variation");
            let disabled = feature.variation("disabled").cloned().expect("variation");

            let launch = Launch::new(
                &mut stack,
                "Launch",
                LaunchProps::new(
                    "rollout",
                    &project,
                    vec![
                        LaunchGroup::new("control", &feature, &disabled),
                        LaunchGroup::new("treatment", &feature, &enabled).with_description("New flow"),
                    ],
                    vec![
                        StepConfig::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
                            .with_weight("control", 90000)
                            .with_weight("treatment", 10000),
                        StepConfig::new(Utc.with_ymd_and_hms(2024, 1, 8, 12, 30, 0).unwrap())
                            .with_weight("control", 50000)
                            .with_weight("treatment", 50000),
                    ],
                ),
            ).expect("Failed to create launch");

            assert_eq!(launch.groups().len(), 2);
            assert_eq!(properties(&stack, "Launch"), json!({
                "Name": "rollout",
                "Project": { "Fn::GetAtt": ["Project", "Arn"] },
                "Description": "",
                "Groups": [
                    { "Feature": "checkout", "GroupName": "control", "Variation": "disabled" },
                    { "Feature": "checkout", "GroupName": "treatment", "Variation": "enabled", "Description": "New flow" }
                ],
                "ScheduledSplitsConfig": [
                    {
                        "GroupWeights": [
                            { "GroupName": "control", "SplitWeight": 90000 },
                            { "GroupName": "treatment", "SplitWeight": 10000 }
                        ],
                        "StartTime": "2024-01-01T00:00:00Z"
                    },
                    {
                        "GroupWeights": [
                            { "GroupName": "control", "SplitWeight": 50000 },
                            { "GroupName": "treatment", "SplitWeight": 50000 }
                        ],
                        "StartTime": "2024-01-08T12:30:00Z"
                    }
                ]
            }));
        }

        it "renders string and handle groups identically" {
            let feature = create_test_feature(&mut stack, &project);
            let disabled = feature.variation("disabled").cloned().expect("variation");

            for (id, group) in [
                ("ByHandle", LaunchGroup::new("off", &feature, &disabled)),
                ("ByName", LaunchGroup::new("off", "checkout", "disabled")),
            ] {
                Launch::new(&mut stack, id, LaunchProps::new(id, &project, vec![group], vec![]))
                    .expect("Failed to create launch");
            }

            let by_handle = properties(&stack, "ByHandle")["Groups"].clone();
            assert_eq!(by_handle, properties(&stack, "ByName")["Groups"]);
            assert_eq!(by_handle, json!([
                { "Feature": "checkout", "GroupName": "off", "Variation": "disabled" }
            ]));
        }

        it "accepts zero groups" {
            Launch::new(&mut stack, "NoGroups", LaunchProps::new("empty", &project, vec![], vec![]))
                .expect("Failed to create launch");
            let props = properties(&stack, "NoGroups");
            assert_eq!(props["Groups"], json!([]));
            assert_eq!(props["Description"], json!(""));
        }

        it "accepts five groups" {
            let groups = (0..5).map(|i| LaunchGroup::new(format!("g{}", i), "checkout", "enabled")).collect();
            assert!(Launch::new(&mut stack, "Five", LaunchProps::new("five", &project, groups, vec![])).is_ok());
        }

        it "fails with six groups" {
            let groups = (0..6).map(|i| LaunchGroup::new(format!("g{}", i), "checkout", "enabled")).collect();
            let result = Launch::new(&mut stack, "Six", LaunchProps::new("six", &project, groups, vec![]));
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
            assert!(stack.resource("Six").is_none());
        }

        it "renders an unnamed variation as an empty name" {
            let feature = Feature::new(
                &mut stack,
                "Unnamed",
                FeatureProps::new("unnamed", &project, vec![Variation::new(1_i64)]),
            ).expect("Failed to create feature");
            let variation = feature.variations()[0].clone();
            assert_eq!(variation.name(), "");

            Launch::new(
                &mut stack,
                "UnnamedLaunch",
                LaunchProps::new("l", &project, vec![LaunchGroup::new("g", &feature, &variation)], vec![]),
            ).expect("Failed to create launch");

            assert_eq!(properties(&stack, "UnnamedLaunch")["Groups"][0]["Variation"], json!(""));
        }

        it "does not check step group names" {
            let step = StepConfig::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
                .with_weight("nobody", 100000);
            assert!(Launch::new(&mut stack, "Loose", LaunchProps::new("loose", &project, vec![], vec![step])).is_ok());
        }

        it "imports by attributes" {
            let arn = "arn:aws:evidently:us-east-1:123456789012:project/my-project/launch/rollout";
            let launch = Launch::from_launch_attributes(LaunchAttributes {
                launch_arn: arn.to_string(),
                groups: vec![LaunchGroup::new("control", "checkout", "disabled")],
            }).expect("Import failed");

            assert_eq!(launch.name(), "rollout");
            assert_eq!(launch.arn().as_literal(), Some(arn));
            assert_eq!(launch.groups().len(), 1);
            assert!(launch.logical_id().is_none());
        }
    }
}
