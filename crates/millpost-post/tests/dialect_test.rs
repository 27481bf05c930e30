use millpost_core::{Bounds, Cooling, Position};
use millpost_post::{
    CycleDefinition, DinPost, FanucPost, HeidenhainPost, MachineState, OperationIntro,
    PostProcessor, RadiusCompensation, Sinumerik840D,
};
use millpost_toolpath::DrillCycle;

fn peck_definition() -> CycleDefinition {
    CycleDefinition {
        cycle: DrillCycle::PeckDrill,
        top_z: 0.0,
        safe_z0: 2.0,
        safe_z1: 12.0,
        depth: 10.0,
        q_min: 1.0,
        q_max: 3.0,
        retract: 0.5,
        dwell: 0.0,
        feed: 120.0,
    }
}

#[test]
fn test_din_traverse_suppresses_repeated_target() {
    let post = DinPost;
    let mut state = MachineState::new();
    let target = Position::new(5.0, 5.0, 20.0);

    let first = post.traverse(&mut state, target, true);
    assert_eq!(first, "G0 X5.000 Y5.000 Z20.000");

    let second = post.traverse(&mut state, target, true);
    assert!(!second.contains('X'));
    assert!(!second.contains('Y'));
    assert!(!second.contains('Z'));
    assert_eq!(state.last_position, target);
}

#[test]
fn test_din_straight_move_feed_word_only_when_nonzero() {
    let post = DinPost;
    let mut state = MachineState::new();

    let with_feed = post.straight_move(&mut state, Position::new(10.0, 0.0, 0.0), 600.0);
    assert_eq!(with_feed, "G1 X10.000 F600");

    let without_feed = post.straight_move(&mut state, Position::new(10.0, 4.0, 0.0), 0.0);
    assert_eq!(without_feed, "G1 Y4.000");
}

#[test]
fn test_din_arc_incremental_center_offsets() {
    let post = DinPost;
    let mut state = MachineState::new();
    state.last_position = Position::new(10.0, 0.0, -2.0);

    let cmd = post.arc(
        &mut state,
        Position::new(-10.0, 0.0, -2.0),
        Position::new(0.0, 0.0, -2.0),
        true,
        300.0,
    );
    assert_eq!(cmd, "G3 X-10.000 I-10.000 F300");
    assert_eq!(state.last_position, Position::new(-10.0, 0.0, -2.0));
}

#[test]
fn test_din_radius_compensation_state_machine() {
    let post = DinPost;
    let mut state = MachineState::new();

    let start = post.radius_correction_start(&mut state, Position::new(3.0, 0.0, 0.0), 5, true);
    assert!(start.starts_with("G1 G42 D5"));
    assert_eq!(state.radius_compensation, RadiusCompensation::Right);

    let start_left = post.radius_correction_start(&mut state, Position::new(4.0, 0.0, 0.0), 5, false);
    assert!(start_left.starts_with("G1 G41 D5"));
    assert_eq!(state.radius_compensation, RadiusCompensation::Left);

    let end = post.radius_correction_end(&mut state);
    assert_eq!(end, "G40");
    assert_eq!(state.radius_compensation, RadiusCompensation::Off);
}

#[test]
fn test_din_fixture_numbering_schemes() {
    let post = DinPost;
    assert_eq!(post.fixture_id(1), "G54");
    assert_eq!(post.fixture_id(6), "G59");
    assert_eq!(post.fixture_id(7), "G59.1");
    assert_eq!(post.fixture_id(9), "G59.3");
}

#[test]
fn test_din_four_block_job_tracks_final_position() {
    let post = DinPost;
    let mut state = MachineState::new();

    let intro = post.operation_intro(
        &mut state,
        &OperationIntro {
            sequence: 1,
            fixture: 1,
            position: Position::new(20.0, 20.0, 10.0),
            speed: 4500.0,
            feed: 600.0,
            tool_number: 3,
            cooling: Cooling::Flood,
            next_tool_number: 4,
        },
    );
    assert!(!intro.is_empty());
    assert!(intro.starts_with("N10 G0 G90 G54 X20.000 Y20.000 S4500 M3"));
    assert!(intro.contains("T4"));
    assert!(intro.contains("G43 H3 Z10.000 M8"));
    assert_eq!(state.last_position, Position::new(20.0, 20.0, 10.0));
    assert_eq!(state.current_tool, 3);

    let trav = post.traverse(&mut state, Position::new(20.0, 20.0, 2.0), true);
    assert!(!trav.is_empty());
    assert_eq!(state.last_position, Position::new(20.0, 20.0, 2.0));

    let cut = post.straight_move(&mut state, Position::new(20.0, 20.0, -5.0), 120.0);
    assert!(!cut.is_empty());
    assert_eq!(state.last_position, Position::new(20.0, 20.0, -5.0));

    let exit = post.operation_exit(&mut state);
    assert!(!exit.is_empty());
    // The fixed retract height is a textual constant, not a position update.
    assert_eq!(state.last_position, Position::new(20.0, 20.0, -5.0));
}

#[test]
fn test_din_text_helpers() {
    let post = DinPost;
    assert_eq!(post.line_comment("face top"), "( face top )");
    assert_eq!(post.prominent_comment("Drill #1"), "( Drill #1 )");
    assert_eq!(post.prepare_tool(7), "T7");
    assert_eq!(post.length_correction_start(7), "G43 H7");
    assert_eq!(post.length_correction_end(), "");
    assert_eq!(post.tool_change(), "M98 P100");
}

#[test]
fn test_din_maps_no_cycles() {
    let post = DinPost;
    let mut state = MachineState::new();
    assert_eq!(post.define_cycle(&mut state, &peck_definition()), "");
}

#[test]
fn test_fanuc_cycle_family() {
    let post = FanucPost;
    let mut state = MachineState::new();

    let peck = post.define_cycle(&mut state, &peck_definition());
    assert_eq!(peck, "G83 Z-10.000 R2.000 Q3 F120");

    let mut def = peck_definition();
    def.cycle = DrillCycle::SpotDrill;
    assert_eq!(post.define_cycle(&mut state, &def), "G81 Z-10.000 R2.000 F120");

    def.cycle = DrillCycle::DrillWithDwell;
    def.dwell = 2.0;
    assert_eq!(
        post.define_cycle(&mut state, &def),
        "G82 Z-10.000 R2.000 P2 F120"
    );

    def.cycle = DrillCycle::Tap;
    assert_eq!(post.define_cycle(&mut state, &def), "G84 Z-10.000 R2.000 F120");

    assert_eq!(post.end_cycle(), "G80");
}

#[test]
fn test_fanuc_rejects_cycle_above_surface() {
    let post = FanucPost;
    let mut state = MachineState::new();
    let mut def = peck_definition();
    def.depth = -1.0;
    assert_eq!(post.define_cycle(&mut state, &def), "");
}

#[test]
fn test_fanuc_job_bracket_uses_block_terminator() {
    let post = FanucPost;
    let mut state = MachineState::new();

    assert_eq!(post.job_intro(&mut state, "part"), "G40 G80");
    assert_eq!(post.job_exit(&mut state, "part"), "G91 G28 Y0 Z0;\nM30");
    assert_eq!(post.end_of_line(), ";\n");
    assert_eq!(post.file_extension(), "dnc");
}

#[test]
fn test_heidenhain_program_bracket_replaces_dots() {
    let post = HeidenhainPost;
    let mut state = MachineState::new();

    assert_eq!(post.job_intro(&mut state, "flange.v2"), "BEGIN PGM flange_v2 MM");
    let exit = post.job_exit(&mut state, "flange.v2");
    assert!(exit.starts_with("TOOL CALL 0\n"));
    assert!(exit.ends_with("END PGM flange_v2 MM"));
}

#[test]
fn test_heidenhain_moves_carry_side_word() {
    let post = HeidenhainPost;
    let mut state = MachineState::new();

    let free = post.straight_move(&mut state, Position::new(5.0, -3.0, 0.0), 0.0);
    assert_eq!(free, "L X+5.000 Y-3.000 R0");

    // Compensation start emits nothing; the side shows on the next move.
    let start = post.radius_correction_start(&mut state, Position::new(5.0, -3.0, 0.0), 7, true);
    assert_eq!(start, "");
    assert_eq!(state.radius_compensation, RadiusCompensation::Right);

    let cut = post.straight_move(&mut state, Position::new(9.0, -3.0, 0.0), 0.0);
    assert_eq!(cut, "L X+9.000 RR");

    post.radius_correction_end(&mut state);
    let trav = post.traverse(&mut state, Position::new(9.0, 0.0, 5.0), true);
    assert_eq!(trav, "L Y0.000 Z+5.000 R0 FMAX");
}

#[test]
fn test_heidenhain_arc_emits_center_block() {
    let post = HeidenhainPost;
    let mut state = MachineState::new();
    state.last_position = Position::new(10.0, 0.0, -2.0);

    let cmd = post.arc(
        &mut state,
        Position::new(-10.0, 0.0, -2.0),
        Position::new(0.0, 0.0, -2.0),
        true,
        0.0,
    );
    assert_eq!(cmd, "CC X0.000 Y0.000\nC X-10.000 Y0.000 Z-2.000 DR+");
}

#[test]
fn test_heidenhain_peck_cycle_block() {
    let post = HeidenhainPost;
    let mut state = MachineState::new();

    let cmd = post.define_cycle(&mut state, &peck_definition());
    assert!(cmd.starts_with("CYCLE DEF 200\n"));
    assert!(cmd.contains(" Q201=-10.000"));
    assert!(cmd.contains(" Q202=3.000"));
    assert!(cmd.contains(" Q203=0.000"));
    assert!(cmd.contains(" Q206=120"));

    let exec = post.exec_cycle(&mut state, DrillCycle::PeckDrill, 25.0, 30.0);
    assert_eq!(exec, "L X+25.000 Y+30.000 R0 FMAX M99");
    assert_eq!(state.last_position.x, 25.0);
    assert_eq!(state.last_position.y, 30.0);
}

#[test]
fn test_heidenhain_unmapped_cycles_empty() {
    let post = HeidenhainPost;
    let mut state = MachineState::new();
    let mut def = peck_definition();

    def.cycle = DrillCycle::Bore;
    assert_eq!(post.define_cycle(&mut state, &def), "");
    def.cycle = DrillCycle::DrillWithDwell;
    assert_eq!(post.define_cycle(&mut state, &def), "");
}

#[test]
fn test_heidenhain_workpiece_blank() {
    let post = HeidenhainPost;
    let bounds = Bounds::new(
        Position::new(0.0, 0.0, -20.0),
        Position::new(80.0, 40.0, 0.0),
    );
    assert_eq!(
        post.define_workpiece(&bounds),
        "BLK FORM 0.1 Z X0.000 Y0.000 Z-20.000\nBLK FORM 0.2 X80.000 Y40.000 Z0.000"
    );
}

#[test]
fn test_sinumerik_fixture_numbering() {
    let post = Sinumerik840D;
    assert_eq!(post.fixture_id(1), "G54");
    assert_eq!(post.fixture_id(4), "G57");
    assert_eq!(post.fixture_id(5), "G505");
    assert_eq!(post.fixture_id(9), "G509");
}

#[test]
fn test_sinumerik_modal_cycle_family() {
    let post = Sinumerik840D;
    let mut state = MachineState::new();

    let mut def = peck_definition();
    def.cycle = DrillCycle::SpotDrill;
    assert_eq!(
        post.define_cycle(&mut state, &def),
        "MCALL CYCLE81(12.000, 0.000, 2.000, , -10.000)"
    );

    def.cycle = DrillCycle::PeckDrill;
    let peck = post.define_cycle(&mut state, &def);
    assert!(peck.starts_with("MCALL CYCLE83(12.000, 0.000, 2.000,, -10.000,,"));
    assert!(peck.contains("3.000, 2.000, 1, 1, 1, 1,, 1.000,, 0, 0)"));

    def.cycle = DrillCycle::FineBore;
    assert_eq!(post.define_cycle(&mut state, &def), "");

    assert_eq!(post.end_cycle(), "MCALL");
    assert_eq!(post.tool_change(), "M6 D1");
}
