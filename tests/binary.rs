use std::net::TcpListener;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const BIN: &str = env!("CARGO_BIN_EXE_micro-webserver");

fn server_on(port: u16) -> Child {
    Command::new(BIN)
        .args(["--address", "127.0.0.1", "--port", &port.to_string()])
        .env_remove("RUST_LOG")
        .env_remove("MICRO_WEBSERVER_CONFIG")
        .env("RUST_BACKTRACE", "1")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap()
}

fn wait_bounded(mut child: Child, bound: Duration) -> Output {
    let started = Instant::now();
    while child.try_wait().unwrap().is_none() {
        if started.elapsed() > bound {
            child.kill().unwrap();
            panic!("server did not exit within {:?}", bound);
        }
        thread::sleep(Duration::from_millis(20));
    }
    child.wait_with_output().unwrap()
}

#[test]
fn port_in_use_exits_with_a_single_report() {
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let output = wait_bounded(server_on(port), Duration::from_secs(10));
    assert_eq!(output.status.code(), Some(1));

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        text.matches("could not bind listening socket").count(),
        1,
        "bind failure reported more than once:\n{}",
        text
    );
    assert!(text.contains(&format!("127.0.0.1:{}", port)));
    assert!(!text.contains("Caused by"));
    assert!(!text.contains("Stack backtrace"));
}
