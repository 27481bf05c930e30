use millpost_core::{Bounds, Cooling, Position, ToolEntry};
use millpost_toolpath::{
    load_job, plan_drill_targets, save_job, DrillCycle, JobFile, Operation, OperationKind,
    RadiusSide, Workstep, WorkstepKind,
};
use tempfile::tempdir;

fn sample_operations() -> Vec<Operation> {
    let mut drill = Operation::new(1, "Drill #1", OperationKind::Drill);
    drill.tool_number = 4;
    drill.cooling = Cooling::Flood;
    drill.speed = 4500.0;
    drill.feed = 180.0;
    drill.drill.cycle = DrillCycle::PeckDrill;
    drill.drill.final_depth = -18.0;
    drill.drill.q_min = 1.0;
    drill.drill.q_max = 4.0;
    plan_drill_targets(
        &mut drill,
        &[Position::new(10.0, 10.0, 0.0), Position::new(40.0, 10.0, 0.0)],
    );

    let mut contour = Operation::new(2, "Contour #1", OperationKind::Contour);
    contour.tool_number = 2;
    contour.feed = 600.0;
    contour.radius_side = RadiusSide::Left;
    contour.push_step(
        Workstep::traverse(Position::new(0.0, 0.0, 50.0), Position::new(-5.0, 0.0, 5.0)).unwrap(),
    );
    contour.push_step(Workstep::straight_move(
        Position::new(-5.0, 0.0, 5.0),
        Position::new(-5.0, 0.0, -3.0),
    ));
    contour.push_step(Workstep::arc(
        Position::new(-5.0, 0.0, -3.0),
        Position::new(5.0, 0.0, -3.0),
        Position::new(0.0, 0.0, -3.0),
        false,
    ));

    vec![drill, contour]
}

#[test]
fn test_job_round_trip_preserves_order_and_variants() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bracket.mpj");

    let ops = sample_operations();
    let tools = vec![ToolEntry::new(4, "twist drill 8.5").with_geometry(8.5, 8.5, 60.0)];
    let bounds = Bounds::new(Position::new(0.0, 0.0, -20.0), Position::new(80.0, 40.0, 0.0));

    let job = JobFile::from_operations("bracket", bounds, &tools, &ops);
    save_job(&path, &job).unwrap();

    let restored = load_job(&path).unwrap();
    assert_eq!(restored.version, "1.0");
    assert_eq!(restored.metadata.name, "bracket");
    assert_eq!(restored.tools.len(), 1);
    assert_eq!(restored.workpiece, bounds);

    let restored_ops = restored.into_operations().unwrap();
    assert_eq!(restored_ops, ops);

    // Variant identity survives: the contour sequence restores as
    // traverse / straight move / arc in that order.
    let kinds: Vec<bool> = restored_ops[1]
        .worksteps
        .iter()
        .map(|w| matches!(w.kind(), WorkstepKind::Arc { .. }))
        .collect();
    assert_eq!(kinds, vec![false, false, true]);
}

#[test]
fn test_unknown_workstep_type_rejected() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "bad",
            "created": "2025-01-01T00:00:00Z",
            "modified": "2025-01-01T00:00:00Z"
        },
        "operations": [{
            "id": 1, "name": "Op", "kind": "contour", "fixture": 1,
            "speed": 0.0, "feed": 0.0, "tool_number": 1,
            "safe_z0": 2.0, "safe_z1": 10.0, "upper_z": 0.0, "lower_z": -5.0,
            "worksteps": [{
                "step_type": "spiral",
                "start": [0.0, 0.0, 0.0],
                "end": [1.0, 0.0, 0.0]
            }]
        }]
    }"#;
    let job: JobFile = serde_json::from_str(json).unwrap();
    let err = job.into_operations().unwrap_err();
    assert_eq!(err.to_string(), "unknown workstep type: spiral");
}

#[test]
fn test_unsupported_version_rejected() {
    let ops = sample_operations();
    let mut job = JobFile::from_operations("v2", Bounds::default(), &[], &ops);
    job.version = "2.7".to_string();
    assert!(job.into_operations().is_err());
}
