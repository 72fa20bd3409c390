use mmar_launch::{Config, Launcher, Override};

#[test]
fn init_writes_launch_toml_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let path = Launcher::init(root).unwrap();
    assert!(path.ends_with("launch.toml"));
    assert!(path.exists());

    // a second init leaves the existing file alone
    let before = std::fs::read_to_string(&path).unwrap();
    Launcher::init(root).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn open_on_a_bare_directory_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let l = Launcher::open(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(l.cfg.gpu.cuda_visible_devices, "1");
    assert_eq!(l.cfg.client.config_file, "config/config_fed_client2.json");
}

#[test]
fn open_picks_up_a_saved_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default_for_client();
    cfg.gpu.cuda_visible_devices = "0,1".to_string();
    cfg.save_to(&Config::config_path(dir.path())).unwrap();

    let l = Launcher::open(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(l.cfg.gpu.cuda_visible_devices, "0,1");
}

#[test]
fn plan_applies_gpu_override_without_touching_the_config() {
    let dir = tempfile::tempdir().unwrap();
    let l = Launcher::open(dir.path().to_str().unwrap()).unwrap();

    let plan = l.plan(Some("0"), &[]);
    let gpu = plan
        .envs
        .iter()
        .find(|(k, _)| k == "CUDA_VISIBLE_DEVICES")
        .map(|(_, v)| v.as_str());
    assert_eq!(gpu, Some("0"));
    assert_eq!(l.cfg.gpu.cuda_visible_devices, "1");
}

#[test]
fn run_forwards_the_child_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut l = Launcher::open(dir.path().to_str().unwrap()).unwrap();
    l.cfg.client.interpreter = "false".to_string();
    l.cfg.client.overrides.clear();

    let plan = l.plan(None, &[]);
    let code = l.run(&plan).unwrap();
    assert_eq!(code, 1);

    l.cfg.client.interpreter = "true".to_string();
    let plan = l.plan(None, &[]);
    assert_eq!(l.run(&plan).unwrap(), 0);
}

#[test]
fn run_errors_only_when_spawn_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut l = Launcher::open(dir.path().to_str().unwrap()).unwrap();
    l.cfg.client.interpreter = "definitely-not-a-real-interpreter".to_string();

    let plan = l.plan(None, &[]);
    let err = l.run(&plan).unwrap_err();
    assert!(err.to_string().contains("spawn"));
}

#[test]
fn extra_cli_overrides_land_at_the_tail() {
    let dir = tempfile::tempdir().unwrap();
    let l = Launcher::open(dir.path().to_str().unwrap()).unwrap();

    let extra = vec!["uid=7".parse::<Override>().unwrap()];
    let plan = l.plan(None, &extra);
    // duplicates are forwarded as-is; the client decides which wins
    let tail: Vec<&str> = plan.args.iter().rev().take(3).rev().map(|s| s.as_str()).collect();
    assert_eq!(tail, vec!["secure_train=true", "uid=2", "uid=7"]);
}
