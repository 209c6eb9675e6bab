mod common;
use common::*;

#[test]
fn test_for_loop() {
    let mut r = program(&["10 FOR I = 1 TO 3", "20 PRINT I;", "30 NEXT I"]);
    assert_eq!(exec(&mut r, "RUN"), "123");
}

#[test]
fn test_for_loop_always_runs_once() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "FOR I=3 TO 0:PRINT I:NEXT I"), "3\n");
}

#[test]
fn test_for_loop_direct_with_step() {
    let mut r = runtime();
    assert_eq!(
        exec(&mut r, "FOR I=3 TO 1 STEP -1:PRINT I;:NEXT I:PRINT"),
        "321\n"
    );
    assert_eq!(exec(&mut r, "FOR I=0 TO 1 STEP 0.5:PRINT I;\" \";:NEXT I"), "0 0.5 1 ");
}

#[test]
fn test_nested_for_loops() {
    let mut r = program(&[
        "10 FOR Y = 1 TO 2",
        "20 FOR X = 8 TO 9",
        "30 PRINT Y;X;\" \";",
        "40 NEXT X",
        "50 NEXT Y",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "18 19 28 29 ");
}

#[test]
fn test_next_without_for() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "I=1:NEXT I"), "?NEXT WITHOUT FOR\n");
    assert_eq!(exec(&mut r, "NEXT J"), "?VARIABLE NOT FOUND\n");
}

#[test]
fn test_loop_variable_readable() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "FOR I=1 TO 2:NEXT I:PRINT I"), "3\n");
    assert_eq!(exec(&mut r, "I=7:PRINT I"), "7\n");
}

#[test]
fn test_gosub_return() {
    let mut r = program(&[
        "10 GOSUB 100",
        "20 PRINT \"BACK\"",
        "30 GOTO 200",
        "100 PRINT \"SUB\"",
        "110 RETURN",
        "200 REM done",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "SUB\nBACK\n");
}

#[test]
fn test_gosub_returns_mid_line() {
    let mut r = program(&[
        "10 GOSUB 100: PRINT \"AFTER\": GOSUB 100",
        "20 GOTO 200",
        "100 PRINT \"SUB\";",
        "110 RETURN",
        "200 REM",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "SUBAFTER\nSUB");
}

#[test]
fn test_gosub_from_direct_mode() {
    let mut r = program(&["100 PRINT \"SUB\"", "110 RETURN"]);
    assert_eq!(exec(&mut r, "GOSUB 100:PRINT \"DIRECT\""), "SUB\nDIRECT\n");
}

#[test]
fn test_return_without_gosub() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "RETURN"), "?RETURN WITHOUT GOSUB\n");
    let mut r = program(&["10 RETURN"]);
    assert_eq!(exec(&mut r, "RUN"), "?RETURN WITHOUT GOSUB IN 10\n");
}

#[test]
fn test_recursive_gosub_runs_out_of_memory() {
    let mut r = program(&["10 GOSUB 10"]);
    assert_eq!(exec(&mut r, "RUN"), "?OUT OF MEMORY IN 10\n");
}

#[test]
fn test_goto_computed() {
    let mut r = program(&[
        "10 X = 2",
        "20 GOTO 100 + X * 10",
        "110 PRINT \"ONE\"",
        "120 PRINT \"TWO\"",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "TWO\n");
}

#[test]
fn test_goto_missing_line_goes_to_next() {
    let mut r = program(&["10 GOTO 15", "20 PRINT \"TWENTY\""]);
    assert_eq!(exec(&mut r, "RUN"), "TWENTY\n");
    let mut r = program(&["10 GOTO 0"]);
    assert_eq!(exec(&mut r, "RUN"), "?BAD LINE NUMBER IN 10\n");
}

#[test]
fn test_stop_and_cont() {
    let mut r = program(&["10 PRINT 1", "20 STOP", "30 PRINT 2"]);
    assert_eq!(exec(&mut r, "RUN"), "1\n?STOP STATEMENT IN 20\n");
    assert_eq!(exec(&mut r, "CONT"), "2\n");
}

#[test]
fn test_stop_mid_line_then_cont() {
    let mut r = program(&["10 PRINT 1;: STOP: PRINT 2"]);
    assert_eq!(exec(&mut r, "RUN"), "1?STOP STATEMENT IN 10\n");
    assert_eq!(exec(&mut r, "CONT"), "2\n");
}

#[test]
fn test_cont_after_run_does_nothing() {
    let mut r = program(&["10 PRINT 1"]);
    assert_eq!(exec(&mut r, "RUN"), "1\n");
    assert_eq!(exec(&mut r, "CONT"), "");
}

#[test]
fn test_run_clears_variables() {
    let mut r = program(&["10 PRINT A"]);
    exec(&mut r, "A=1");
    assert_eq!(exec(&mut r, "RUN"), "?VARIABLE NOT FOUND IN 10\n");
}

#[test]
fn test_run_from_line() {
    let mut r = program(&["10 PRINT 10", "20 PRINT 20"]);
    assert_eq!(exec(&mut r, "RUN 20"), "20\n");
}

#[test]
fn test_new() {
    let mut r = program(&["10 PRINT 10"]);
    let free = r.free_memory();
    exec(&mut r, "A=1");
    assert_eq!(exec(&mut r, "NEW"), "");
    assert_eq!(exec(&mut r, "LIST"), "");
    assert_eq!(exec(&mut r, "PRINT A"), "?VARIABLE NOT FOUND\n");
    assert!(r.free_memory() > free);
}

#[test]
fn test_new_in_program_ends_run() {
    let mut r = program(&["10 NEW", "20 PRINT 20"]);
    assert_eq!(exec(&mut r, "RUN"), "");
    assert_eq!(exec(&mut r, "LIST"), "");
}

#[test]
fn test_list() {
    let mut r = program(&[
        "30 rem the end",
        "10 print \"a\";b",
        "20 for i=1 to 2 step 1:next i",
    ]);
    assert_eq!(
        exec(&mut r, "LIST"),
        "10 PRINT \"a\";b\n20 FOR i=1 TO 2 STEP 1: NEXT i\n30 REM the end\n"
    );
    assert_eq!(exec(&mut r, "LIST 20"), "20 FOR i=1 TO 2 STEP 1: NEXT i\n30 REM the end\n");
    assert_eq!(exec(&mut r, "LIST ,10"), "10 PRINT \"a\";b\n");
    assert_eq!(exec(&mut r, "LIST 15,25"), "20 FOR i=1 TO 2 STEP 1: NEXT i\n");
}

#[test]
fn test_replace_and_delete_lines() {
    let mut r = program(&["10 PRINT 1", "20 PRINT 2"]);
    exec(&mut r, "10 PRINT 3");
    exec(&mut r, "20");
    assert_eq!(exec(&mut r, "LIST"), "10 PRINT 3\n");
    assert_eq!(exec(&mut r, "99"), "");
}

#[test]
fn test_bad_line_is_not_stored() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "10 PRINT 1+"), "?ERROR IN EXPR IN 10\n");
    assert_eq!(exec(&mut r, "20 FOO BAR"), "?ERROR IN EXPR IN 20\n");
    assert_eq!(exec(&mut r, "30 IF 1 PRINT 2"), "?MISSING THEN IN IF IN 30\n");
    assert_eq!(exec(&mut r, "LIST"), "");
}

#[test]
fn test_statement_separators() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PRINT 1:PRINT 2"), "1\n2\n");
    assert_eq!(exec(&mut r, "PRINT 1:"), "?BAD COMMAND\n");
    assert_eq!(exec(&mut r, "A=1 B=2"), "?BAD COMMAND\n");
}

#[test]
fn test_check_mode_has_no_side_effects() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "10 A=1: PRINT \"X\": GOSUB 100"), "");
    assert_eq!(exec(&mut r, "PRINT A"), "?VARIABLE NOT FOUND\n");
}

#[test]
fn test_print_semicolon() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PRINT \"A\";\"B\";"), "AB");
    assert_eq!(exec(&mut r, "PRINT \"A\";\"B\""), "AB\n");
    assert_eq!(exec(&mut r, "PRINT"), "\n");
}

#[test]
fn test_rem() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PRINT 1: REM PRINT 2: PRINT 3"), "1\n");
}

#[test]
fn test_let() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "LET A$=\"HI\":LET B=2:PRINT A$;B"), "HI2\n");
    assert_eq!(exec(&mut r, "LET A$=2"), "?STRING EXPR EXPECTED\n");
    assert_eq!(exec(&mut r, "LET B=\"X\""), "?NUMERIC EXPR EXPECTED\n");
}

#[test]
fn test_break_pressed() {
    let mut r = program(&["10 GOTO 10"]);
    r.host_mut().break_after = Some(100);
    assert_eq!(exec(&mut r, "RUN"), "?BREAK PRESSED IN 10\n");
}

#[test]
fn test_pause_position_cls() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PAUSE 250:POSITION 3,4"), "");
    assert_eq!(r.host().slept_ms, 250);
    assert_eq!(r.host().cursor, (3, 4));
    assert_eq!(exec(&mut r, "PAUSE -1"), "?BAD PARAMETER\n");
    assert_eq!(exec(&mut r, "PRINT 1;:CLS"), "");
}

#[test]
fn test_pins() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PINMODE 13,1:PIN 13,5"), "");
    assert_eq!(r.host().pins.get(&13), Some(&1));
    assert_eq!(r.host().pin_modes.get(&13), Some(&1));
    assert_eq!(exec(&mut r, "PIN 13"), "?ERROR IN EXPR\n");
}
