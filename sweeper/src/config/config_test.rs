use super::SweeperConfig;

#[test]
pub fn parse_full_config() {
    let config: SweeperConfig = serde_yaml::from_str(
        "max_batch_size: 16\n\
         params:\n\
         \x20 application_workers: \"1,4\"\n\
         \x20 benchmarks.fio.direct_io: \"false,true\"\n\
         launcher:\n\
         \x20 name: console\n",
    )
    .unwrap();

    assert_eq!(config.max_batch_size, Some(16));
    assert_eq!(config.launcher.name, "console");
    assert_eq!(
        config.params_as_overrides(),
        vec!["application_workers=1,4", "benchmarks.fio.direct_io=false,true"]
    );
}

#[test]
pub fn defaults_apply_for_empty_config() {
    let config: SweeperConfig = serde_yaml::from_str("{}").unwrap();

    assert_eq!(config.max_batch_size, None);
    assert!(config.params.is_empty());
    assert_eq!(config.launcher.name, "console");
}

#[test]
pub fn unknown_fields_are_rejected() {
    let result: Result<SweeperConfig, _> = serde_yaml::from_str("max_jobs: 3");

    assert!(result.is_err());
}

#[test]
pub fn validate_batch_enforces_max_batch_size() {
    let config: SweeperConfig = serde_yaml::from_str("max_batch_size: 2").unwrap();
    let batch = vec![vec!["benchmark_type=fio".to_owned()]; 3];

    assert!(config.validate_batch(&batch).is_err());
    assert!(config.validate_batch(&batch[..2].to_vec()).is_ok());

    let unbounded = SweeperConfig::default();
    assert!(unbounded.validate_batch(&batch).is_ok());
}
