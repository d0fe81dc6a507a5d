mod helpers;

use helpers::{run_cli, EnvGuard};
use holdem_cli::logging::init_test_logging;
use serial_test::serial;
use tracing::Level;

#[test]
#[serial]
fn simulation_logs_start_and_finish() {
    let _env = EnvGuard::clean();
    let logs = init_test_logging();
    let res = run_cli(&["sim", "--hands", "3", "--seed", "12", "--players", "2"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(logs.contains(Level::INFO, "simulation game started"));
    assert!(logs.contains(Level::INFO, "simulation finished"));
    // logging never leaks into command output
    assert!(!res.stdout.contains("simulation finished"));
}

#[test]
#[serial]
fn failed_command_logs_warning() {
    let _env = EnvGuard::clean();
    let logs = init_test_logging();
    let res = run_cli(&["sim", "--hands", "1", "--lineup", "ghost"]);
    assert_eq!(res.exit_code, 2);
    assert!(logs.contains(Level::WARN, "command failed"));
    assert!(logs
        .entries()
        .iter()
        .any(|e| e.fields.iter().any(|(k, v)| k == "command" && v.contains("sim"))));
}
