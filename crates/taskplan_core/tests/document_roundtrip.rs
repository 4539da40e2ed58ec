use serde_json::json;
use taskplan_core::{
    deserialize, from_json, serialize, to_json, DocumentError, Project, ProjectRecord,
    ProjectStore, TaskRecord,
};

fn sample_store() -> ProjectStore {
    let mut store = ProjectStore::new();

    let p1 = store.create_project("P1").unwrap();
    let a = p1.create_task("A", 2).unwrap();
    let b = p1.create_task("B", 4).unwrap();
    p1.create_task("C", 5).unwrap();
    a.add_successor(&b);

    let p2 = store.create_project("P2").unwrap();
    let x = p2.create_task("X", 1).unwrap();
    let y = p2.create_task("Y", 1).unwrap();
    x.add_successor(&y);
    y.add_successor(&x);

    store
}

/// Flattens a store to (project, [(task, duration, [successor names])]).
fn shape(store: &ProjectStore) -> Vec<(String, Vec<(String, u32, Vec<String>)>)> {
    store
        .projects()
        .iter()
        .map(|project| {
            let tasks = project
                .tasks()
                .iter()
                .map(|task| {
                    let successors = task
                        .successors()
                        .iter()
                        .map(|successor| successor.name().to_string())
                        .collect();
                    (task.name().to_string(), task.duration(), successors)
                })
                .collect();
            (project.name().to_string(), tasks)
        })
        .collect()
}

#[test]
fn round_trip_reproduces_projects_tasks_and_edges() {
    let store = sample_store();

    let reloaded = deserialize(&serialize(&store).unwrap()).unwrap();

    assert_eq!(shape(&reloaded), shape(&store));
    let p1 = reloaded.find_project("P1").unwrap();
    let c = p1.find_task("C").unwrap();
    assert_eq!(c.duration(), 5);
    assert!(c.successors().is_empty());
}

#[test]
fn round_trip_through_json_text() {
    let store = sample_store();

    let text = to_json(&store).unwrap();
    let reloaded = from_json(&text).unwrap();

    assert_eq!(shape(&reloaded), shape(&store));
    assert_eq!(to_json(&reloaded).unwrap(), text);
}

#[test]
fn round_trip_rebuilds_edges_as_node_links() {
    let store = sample_store();

    let reloaded = deserialize(&serialize(&store).unwrap()).unwrap();

    let p2 = reloaded.find_project("P2").unwrap();
    let x = p2.find_task("X").unwrap();
    let y = p2.find_task("Y").unwrap();
    assert_eq!(x.successors(), vec![y.clone()]);
    assert_eq!(y.successors(), vec![x]);
}

#[test]
fn serialized_document_uses_expected_wire_fields() {
    let store = sample_store();

    let value = serde_json::to_value(serialize(&store).unwrap()).unwrap();

    assert_eq!(
        value,
        json!([
            {
                "name": "P1",
                "tasks": [
                    { "name": "A", "duration": 2, "successors": ["B"] },
                    { "name": "B", "duration": 4, "successors": [] },
                    { "name": "C", "duration": 5, "successors": [] }
                ]
            },
            {
                "name": "P2",
                "tasks": [
                    { "name": "X", "duration": 1, "successors": ["Y"] },
                    { "name": "Y", "duration": 1, "successors": ["X"] }
                ]
            }
        ])
    );
}

#[test]
fn successor_may_be_declared_before_its_task() {
    let records = vec![ProjectRecord {
        name: "P".to_string(),
        tasks: vec![
            TaskRecord {
                name: "First".to_string(),
                duration: 1,
                successors: vec!["Last".to_string()],
            },
            TaskRecord {
                name: "Last".to_string(),
                duration: 1,
                successors: vec![],
            },
        ],
    }];

    let store = deserialize(&records).unwrap();

    let project = store.find_project("P").unwrap();
    let first = project.find_task("First").unwrap();
    assert_eq!(first.successors(), vec![project.find_task("Last").unwrap()]);
}

#[test]
fn unknown_successor_fails_whole_load() {
    let text = json!([
        { "name": "Good", "tasks": [ { "name": "A", "duration": 1, "successors": [] } ] },
        { "name": "Bad", "tasks": [
            { "name": "B", "duration": 1, "successors": ["Z"] }
        ] }
    ])
    .to_string();

    let err = from_json(&text).unwrap_err();

    match err {
        DocumentError::UnknownSuccessor {
            project,
            task,
            successor,
        } => {
            assert_eq!(project, "Bad");
            assert_eq!(task, "B");
            assert_eq!(successor, "Z");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn successor_names_do_not_resolve_across_projects() {
    let text = json!([
        { "name": "P1", "tasks": [ { "name": "A", "duration": 1, "successors": [] } ] },
        { "name": "P2", "tasks": [ { "name": "X", "duration": 1, "successors": ["A"] } ] }
    ])
    .to_string();

    let err = from_json(&text).unwrap_err();
    assert!(matches!(err, DocumentError::UnknownSuccessor { .. }));
}

#[test]
fn duplicate_task_names_in_one_project_are_rejected() {
    let text = json!([
        { "name": "P", "tasks": [
            { "name": "A", "duration": 1, "successors": [] },
            { "name": "A", "duration": 2, "successors": [] }
        ] }
    ])
    .to_string();

    let err = from_json(&text).unwrap_err();
    assert!(
        matches!(err, DocumentError::DuplicateTaskName { ref project, ref name } if project == "P" && name == "A"),
        "unexpected error: {err}"
    );
    assert_eq!(err.to_string(), "project `P` declares task `A` more than once");
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn same_task_name_in_different_projects_is_fine() {
    let text = json!([
        { "name": "P1", "tasks": [ { "name": "A", "duration": 1, "successors": [] } ] },
        { "name": "P2", "tasks": [ { "name": "A", "duration": 2, "successors": [] } ] }
    ])
    .to_string();

    let store = from_json(&text).unwrap();
    assert_eq!(store.task_count(), 2);
}

#[test]
fn self_and_repeated_successors_in_document_are_filtered() {
    let text = json!([
        { "name": "P", "tasks": [
            { "name": "A", "duration": 1, "successors": ["A", "B", "B"] },
            { "name": "B", "duration": 1, "successors": [] }
        ] }
    ])
    .to_string();

    let store = from_json(&text).unwrap();

    let project = store.find_project("P").unwrap();
    let a = project.find_task("A").unwrap();
    assert_eq!(a.successors(), vec![project.find_task("B").unwrap()]);
}

#[test]
fn structural_deviations_are_malformed() {
    let cases = [
        json!({ "name": "P", "tasks": [] }),
        json!([ { "tasks": [] } ]),
        json!([ { "name": "P" } ]),
        json!([ { "name": "P", "tasks": [ { "name": "A", "duration": 1 } ] } ]),
        json!([ { "name": "P", "tasks": [ { "name": "A", "duration": -1, "successors": [] } ] } ]),
        json!([ { "name": "P", "tasks": [ { "name": "A", "duration": "1", "successors": [] } ] } ]),
        json!([ { "name": 7, "tasks": [] } ]),
    ];

    for case in cases {
        let err = from_json(&case.to_string()).unwrap_err();
        assert!(
            matches!(err, DocumentError::Malformed(_)),
            "expected malformed for {case}, got {err}"
        );
    }

    assert!(matches!(
        from_json("not json").unwrap_err(),
        DocumentError::Malformed(_)
    ));
}

#[test]
fn blank_names_in_document_are_rejected() {
    let text = json!([ { "name": "P", "tasks": [ { "name": " ", "duration": 1, "successors": [] } ] } ])
        .to_string();

    let err = from_json(&text).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidName { .. }));
}

#[test]
fn unknown_extra_keys_are_ignored() {
    let text = json!([
        { "name": "P", "color": "red", "tasks": [
            { "name": "A", "duration": 1, "successors": [], "note": "x" }
        ] }
    ])
    .to_string();

    let store = from_json(&text).unwrap();
    assert_eq!(store.task_count(), 1);
}

#[test]
fn empty_document_gives_empty_store() {
    let store = from_json("[]").unwrap();
    assert!(store.is_empty());
    assert_eq!(to_json(&store).unwrap(), "[]");
}

#[test]
fn serialize_refuses_successor_from_another_project() {
    let mut store = ProjectStore::new();
    let p1 = store.create_project("P1").unwrap();
    let p2 = Project::new("P2").unwrap();
    store.add_project(p2.clone());
    let a = p1.create_task("A", 1).unwrap();
    let x = p2.create_task("X", 1).unwrap();
    a.add_successor(&x);

    let err = serialize(&store).unwrap_err();

    match err {
        DocumentError::ForeignSuccessor {
            project,
            task,
            successor,
        } => {
            assert_eq!(project, "P1");
            assert_eq!(task, "A");
            assert_eq!(successor, "X");
        }
        other => panic!("unexpected error: {other}"),
    }
}
