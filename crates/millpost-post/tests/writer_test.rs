use millpost_core::{Bounds, Cooling, Position, ToolEntry};
use millpost_post::{create, GcodeWriter};
use millpost_toolpath::{
    plan_drill_targets, DrillCycle, Operation, OperationKind, RadiusSide, Workstep,
};
use tempfile::tempdir;

fn drill_operation() -> Operation {
    let mut op = Operation::new(1, "Drill #1", OperationKind::Drill);
    op.tool_number = 4;
    op.cooling = Cooling::Flood;
    op.speed = 4500.0;
    op.feed = 120.0;
    op.upper_z = 0.0;
    op.drill.cycle = DrillCycle::PeckDrill;
    op.drill.final_depth = -10.0;
    op.drill.is_absolute = true;
    op.drill.q_min = 1.0;
    op.drill.q_max = 3.0;
    plan_drill_targets(
        &mut op,
        &[Position::new(10.0, 10.0, 0.0), Position::new(40.0, 10.0, 0.0)],
    );
    op
}

fn contour_operation() -> Operation {
    let mut op = Operation::new(2, "Contour #1", OperationKind::Contour);
    op.tool_number = 2;
    op.speed = 8000.0;
    op.feed = 600.0;
    op.push_step(
        Workstep::traverse(Position::new(0.0, 0.0, 50.0), Position::new(-5.0, 0.0, 2.0)).unwrap(),
    );
    op.push_step(Workstep::straight_move(
        Position::new(-5.0, 0.0, 2.0),
        Position::new(-5.0, 0.0, -3.0),
    ));
    op.push_step(Workstep::straight_move(
        Position::new(-5.0, 0.0, -3.0),
        Position::new(25.0, 0.0, -3.0),
    ));
    op
}

fn bounds() -> Bounds {
    Bounds::new(Position::new(0.0, 0.0, -20.0), Position::new(80.0, 40.0, 0.0))
}

fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(2, "end mill 6").with_geometry(6.0, 6.0, 25.0),
        ToolEntry::new(4, "twist drill 8.5").with_geometry(8.5, 8.5, 60.0),
    ]
}

#[test]
fn test_fanuc_drill_job_orders_cycle_blocks() {
    let mut writer = GcodeWriter::new(create("fanuc").unwrap());
    let mut out = Vec::new();
    let lines = writer
        .process_all_in_one(&mut out, "plate", &bounds(), &tools(), &[drill_operation()])
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(lines > 0);
    let define = text.find("G83 Z-10.000 R2.000 Q3 F120").unwrap();
    let first_hole = text.find("X10.000 Y10.000").unwrap();
    let second_hole = text.find("X40.000 Y10.000").unwrap();
    let cancel = text.rfind("G80;\n").unwrap();
    assert!(define < first_hole && first_hole < second_hole && second_hole < cancel);

    // Fanuc blocks terminate with a semicolon.
    assert!(text.contains("G80;\n"));
    // The job bracket cancels compensation and any active cycle up front.
    assert!(text.starts_with("G40 G80;\n"));
    assert!(text.trim_end().ends_with("M30;"));
}

#[test]
fn test_emission_order_matches_workstep_order() {
    let mut writer = GcodeWriter::new(create("din").unwrap());
    let mut out = Vec::new();
    writer
        .process_all_in_one(&mut out, "plate", &bounds(), &tools(), &[contour_operation()])
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let rapid = text.find("G0 X-5.000 Z2.000").unwrap();
    let plunge = text.find("G1 Z-3.000 F600").unwrap();
    let cut = text.find("G1 X25.000 F600").unwrap();
    assert!(rapid < plunge && plunge < cut);

    // Final tracked position is the last cutting target; the operation
    // exit retract is textual only.
    assert_eq!(writer.state().last_position, Position::new(25.0, 0.0, -3.0));
}

#[test]
fn test_compensated_contour_brackets_cutting_moves() {
    let mut op = contour_operation();
    op.radius_side = RadiusSide::Left;

    let mut writer = GcodeWriter::new(create("din").unwrap());
    let mut out = Vec::new();
    writer
        .process_all_in_one(&mut out, "plate", &bounds(), &tools(), &[op])
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let engage = text.find("G1 G41 D2").unwrap();
    let cancel = text.rfind("G40").unwrap();
    let exit = text.find("G0 G90 Z150 M5").unwrap();
    assert!(engage < cancel && cancel < exit);
}

#[test]
fn test_heidenhain_job_structure() {
    let mut writer = GcodeWriter::new(create("heidenhain").unwrap());
    let mut out = Vec::new();
    writer
        .process_all_in_one(
            &mut out,
            "flange.v2",
            &bounds(),
            &tools(),
            &[drill_operation()],
        )
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let begin = text.find("BEGIN PGM flange_v2 MM").unwrap();
    let blank = text.find("BLK FORM 0.1").unwrap();
    let tool_call = text.find("TOOL CALL 4").unwrap();
    let cycle = text.find("CYCLE DEF 200").unwrap();
    let hole = text.find("L X+10.000 Y+10.000 R0 FMAX M99").unwrap();
    let end = text.find("END PGM flange_v2 MM").unwrap();
    assert!(begin < blank && blank < tool_call && tool_call < cycle && cycle < hole && hole < end);
}

#[test]
fn test_empty_operation_is_skipped_not_fatal() {
    let empty = Operation::new(3, "Empty", OperationKind::Contour);
    let mut writer = GcodeWriter::new(create("din").unwrap());
    let mut out = Vec::new();
    let lines = writer
        .process_all_in_one(&mut out, "plate", &bounds(), &tools(), &[empty])
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(lines > 0);
    assert!(!text.contains("Empty"));
}

#[test]
fn test_single_op_files_per_operation() {
    let dir = tempdir().unwrap();
    let mut writer = GcodeWriter::new(create("fanuc").unwrap());
    let ops = vec![drill_operation(), contour_operation()];

    let lines = writer
        .process_single_ops(dir.path(), "plate", &bounds(), &tools(), &ops, true)
        .unwrap();
    assert!(lines > 0);

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["plate_01_Drill__1.dnc", "plate_02_Contour__1.dnc"]);

    // Requested tool-change block appears in each file.
    let first = std::fs::read_to_string(dir.path().join("plate_01_Drill__1.dnc")).unwrap();
    assert!(first.contains("M98 P100"));
    // The next operation's tool is staged in the drill file's intro.
    assert!(first.contains("T2"));
}
