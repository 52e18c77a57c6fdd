use std::io::Write;

use jstdrive::build_log::MemoryLog;
use jstdrive::streaming::consume_lines_capture;

#[test]
fn merged_stdout_stderr_preserves_observed_order() {
    let (reader, writer) = os_pipe::pipe().expect("pipe");
    let mut writer2 = writer.try_clone().expect("clone");
    let mut writer1 = writer;

    writer1.write_all(b"A\n").expect("write A");
    writer2.write_all(b"B\n").expect("write B");
    writer1.write_all(b"C\n").expect("write C");
    writer2.write_all(b"D\n").expect("write D");
    drop(writer1);
    drop(writer2);

    let log = MemoryLog::new();
    let transcript = consume_lines_capture(std::io::BufReader::new(reader), &log);

    let expected = vec![
        "A".to_string(),
        "B".to_string(),
        "C".to_string(),
        "D".to_string(),
    ];
    assert_eq!(log.forwarded_lines(), expected);
    assert_eq!(transcript.lines().collect::<Vec<_>>(), ["A", "B", "C", "D"]);
}

#[test]
fn crlf_terminated_lines_are_normalized() {
    let (reader, mut writer) = os_pipe::pipe().expect("pipe");
    writer.write_all(b"one\r\ntwo\n").expect("write");
    drop(writer);

    let log = MemoryLog::new();
    let transcript = consume_lines_capture(std::io::BufReader::new(reader), &log);

    assert_eq!(transcript.text(), "one\ntwo");
}
