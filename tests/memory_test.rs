mod common;
use basic::mach::{BufferHost, Runtime};
use common::*;

fn small() -> Runtime<BufferHost> {
    Runtime::new(BufferHost::new(), 256)
}

#[test]
fn test_free_memory_shrinks_with_program() {
    let mut r = runtime();
    let before = r.free_memory();
    assert_eq!(before, 4096);
    exec(&mut r, "10 PRINT 1");
    // header, PRINT, integer, EOL
    assert_eq!(before - r.free_memory(), 4 + 1 + 5 + 1);
    exec(&mut r, "10");
    assert_eq!(r.free_memory(), before);
}

#[test]
fn test_array_too_big() {
    let mut r = small();
    assert_eq!(exec(&mut r, "DIM A(100)"), "?OUT OF MEMORY\n");
    assert_eq!(exec(&mut r, "A=1:PRINT A"), "1\n");
}

#[test]
fn test_failed_store_keeps_old_state() {
    let mut r = small();
    assert_eq!(exec(&mut r, "DIM A(50):A(50)=7"), "");
    let long = "X".repeat(60);
    assert_eq!(
        exec(&mut r, &format!("S$=\"{}\"", long)),
        "?OUT OF MEMORY\n"
    );
    assert_eq!(exec(&mut r, "PRINT A(50)"), "7\n");
    assert_eq!(exec(&mut r, "PRINT S$"), "?VARIABLE NOT FOUND\n");
}

#[test]
fn test_program_fills_memory() {
    let mut r = small();
    let mut failed = None;
    for n in 1..100u16 {
        let out = exec(&mut r, &format!("{} PRINT \"twenty characters..\"", n));
        if !out.is_empty() {
            failed = Some((n, out));
            break;
        }
    }
    let (n, out) = failed.expect("memory never filled");
    assert_eq!(out, format!("?OUT OF MEMORY IN {}\n", n));
    let listed = exec(&mut r, "LIST");
    assert_eq!(listed.lines().count(), n as usize - 1);
}

#[test]
fn test_string_grows_and_shrinks() {
    let mut r = small();
    exec(&mut r, "A=1:S$=\"SHORT\":B=2");
    let free = r.free_memory();
    exec(&mut r, "S$=\"A MUCH LONGER STRING\"");
    assert!(r.free_memory() < free);
    exec(&mut r, "S$=\"SHORT\"");
    assert_eq!(r.free_memory(), free);
    assert_eq!(exec(&mut r, "PRINT A;S$;B"), "1SHORT2\n");
}

#[test]
fn test_frames_and_variables_share_space() {
    let mut r = program(&["100 PRINT A;B$", "110 RETURN"]);
    assert_eq!(exec(&mut r, "A=1:B$=\"X\":GOSUB 100:PRINT A"), "1X\n1\n");
    assert_eq!(r.arena().frame_depth(), 0);
}

#[test]
fn test_stopped_gosub_keeps_frame_until_run() {
    let mut r = program(&["10 GOSUB 20", "20 STOP"]);
    assert_eq!(exec(&mut r, "RUN"), "?STOP STATEMENT IN 20\n");
    assert_eq!(r.arena().frame_depth(), 1);
    exec(&mut r, "NEW");
    assert_eq!(r.arena().frame_depth(), 0);
}

#[test]
fn test_deep_expression_stack() {
    let mut r = small();
    let deep = format!("PRINT {}1{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(exec(&mut r, &deep), "1\n");
}
