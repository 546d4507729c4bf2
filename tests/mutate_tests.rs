use netcfg::{ConfigError, NetworkConfig, RenderMode, ReplaceOptions};

const EOS: &str = "interface Ethernet1
  description foo
  ip address 1.2.3.4/24
interface Ethernet2
  shutdown";

fn eos() -> NetworkConfig {
    NetworkConfig::from_text(EOS, 2)
}

fn block(config: &NetworkConfig) -> String {
    config.render(&config.ids(), RenderMode::Block)
}

#[test]
fn test_add_top_level() {
    let mut config = eos();
    let created = config.add(&["hostname r1", "ip routing"], &[]);
    assert_eq!(created.len(), 2);
    assert_eq!(config.len(), 7);
    assert_eq!(config.items()[5].raw(), "hostname r1");
    assert!(config.items()[6].is_top_level());
}

#[test]
fn test_add_top_level_is_idempotent() {
    let mut config = eos();
    config.add(&["hostname r1"], &[]);
    let before = block(&config);
    let created = config.add(&["hostname r1", "interface Ethernet2"], &[]);
    assert!(created.is_empty());
    assert_eq!(block(&config), before);
}

#[test]
fn test_add_creates_missing_parent() {
    let mut config = eos();
    config.add(&["shutdown"], &["interface Ethernet3"]);

    let parent = config.find(&["interface Ethernet3"]).unwrap();
    let child = config.find(&["interface Ethernet3", "shutdown"]).unwrap();
    assert!(config[parent].is_top_level());
    assert_eq!(config[parent].raw(), "interface Ethernet3");
    assert_eq!(config[child].raw(), "  shutdown");
    assert_eq!(config[child].parents(), &[parent][..]);
    assert_eq!(config[parent].children(), &[child][..]);
}

#[test]
fn test_add_under_existing_parent() {
    let mut config = eos();
    let created = config.add(&["mtu 9000", "no shutdown"], &["interface Ethernet1"]);
    assert_eq!(created.len(), 2);

    let section = config.section(&["interface Ethernet1"]).unwrap();
    assert_eq!(
        config.render(&section, RenderMode::Block),
        "interface Ethernet1\n  description foo\n  ip address 1.2.3.4/24\n  mtu 9000\n  no shutdown"
    );
}

#[test]
fn test_add_is_idempotent() {
    let mut once = eos();
    once.add(&["shutdown"], &["interface Ethernet3"]);

    let mut twice = eos();
    twice.add(&["shutdown"], &["interface Ethernet3"]);
    let created = twice.add(&["shutdown"], &["interface Ethernet3"]);

    assert!(created.is_empty());
    assert_eq!(block(&once), block(&twice));
    assert_eq!(once.len(), twice.len());
}

#[test]
fn test_add_existing_child_skipped() {
    let mut config = eos();
    let created = config.add(&["shutdown"], &["interface Ethernet2"]);
    assert!(created.is_empty());
    assert_eq!(config.len(), 5);
}

#[test]
fn test_add_nested_path_indents_each_level() {
    let mut config = NetworkConfig::from_text("hostname r1", 3);
    config.add(
        &["neighbor 10.0.0.1 activate"],
        &["router bgp 65000", "address-family ipv4"],
    );
    assert_eq!(
        block(&config),
        "hostname r1\nrouter bgp 65000\n   address-family ipv4\n      neighbor 10.0.0.1 activate"
    );

    let leaf = config
        .find(&["router bgp 65000", "address-family ipv4", "neighbor 10.0.0.1 activate"])
        .unwrap();
    assert_eq!(
        config[leaf].ancestry(),
        ["router bgp 65000", "address-family ipv4"]
    );
}

#[test]
fn test_add_partial_path_reuses_existing_levels() {
    let mut config = NetworkConfig::from_text("router bgp 65000\n address-family ipv4", 1);
    let created = config.add(&["network 10.0.0.0/8"], &["router bgp 65000", "address-family ipv6"]);
    assert_eq!(created.len(), 2);
    let section = config.section(&["router bgp 65000"]).unwrap();
    assert_eq!(
        config.render(&section, RenderMode::Block),
        "router bgp 65000\n address-family ipv4\n address-family ipv6\n  network 10.0.0.0/8"
    );
}

#[test]
fn test_replace_in_parent() {
    let mut config = eos();
    let changed = config
        .replace(
            &["description .*"],
            "description bar",
            &["interface Ethernet1"],
            ReplaceOptions::default(),
        )
        .unwrap();
    assert!(changed);
    assert_eq!(config.items()[1].text(), "description bar");
    assert_eq!(config.items()[1].raw(), "  description bar");
    assert_eq!(
        block(&config),
        "interface Ethernet1\n  description bar\n  ip address 1.2.3.4/24\ninterface Ethernet2\n  shutdown"
    );
}

#[test]
fn test_replace_requires_exact_parents() {
    let mut config = eos();
    let changed = config
        .replace(&["shutdown"], "no shutdown", &[], ReplaceOptions::default())
        .unwrap();
    assert!(!changed);
    assert_eq!(block(&config), EOS);
}

#[test]
fn test_replace_is_case_insensitive() {
    let mut config = NetworkConfig::from_text("hostname r1", 1);
    let changed = config
        .replace(&["HOSTNAME"], "hostname r2", &[], ReplaceOptions::default())
        .unwrap();
    assert!(changed);
    assert_eq!(config.items()[0].raw(), "hostname r2");
}

#[test]
fn test_replace_skips_lines_already_replaced() {
    let mut config = NetworkConfig::from_text("ntp server 1.1.1.1\nntp server 2.2.2.2", 1);
    let changed = config
        .replace(
            &["ntp server"],
            "ntp server 1.1.1.1",
            &[],
            ReplaceOptions::default(),
        )
        .unwrap();
    assert!(changed);
    assert_eq!(config.items()[0].text(), "ntp server 1.1.1.1");
    assert_eq!(config.items()[1].text(), "ntp server 1.1.1.1");
}

#[test]
fn test_replace_first_match_only() {
    let mut config = NetworkConfig::from_text("ntp server 1.1.1.1\nntp server 2.2.2.2", 1);
    config
        .replace(&["ntp server"], "ntp server 9.9.9.9", &[], ReplaceOptions::default())
        .unwrap();
    assert_eq!(config.items()[0].text(), "ntp server 9.9.9.9");
    assert_eq!(config.items()[1].text(), "ntp server 2.2.2.2");
}

#[test]
fn test_replace_against_raw_line() {
    let mut config = eos();
    let options = ReplaceOptions {
        ignore_whitespace: false,
        ..Default::default()
    };
    let changed = config
        .replace(&["^  shutdown$"], "no shutdown", &["interface Ethernet2"], options)
        .unwrap();
    assert!(changed);
    assert_eq!(config.items()[4].raw(), "  no shutdown");

    let changed = config
        .replace(
            &["^description"],
            "description x",
            &["interface Ethernet1"],
            options,
        )
        .unwrap();
    assert!(!changed);
}

#[test]
fn test_replace_add_if_missing() {
    let mut config = eos();
    let options = ReplaceOptions {
        add_if_missing: true,
        ..Default::default()
    };
    let changed = config
        .replace(&["mtu \\d+"], "mtu 9000", &["interface Ethernet2"], options)
        .unwrap();
    assert!(changed);
    let id = config.find(&["interface Ethernet2", "mtu 9000"]).unwrap();
    assert_eq!(config[id].raw(), "  mtu 9000");
}

#[test]
fn test_replace_missing_without_add_is_noop() {
    let mut config = eos();
    let changed = config
        .replace(
            &["mtu \\d+"],
            "mtu 9000",
            &["interface Ethernet2"],
            ReplaceOptions::default(),
        )
        .unwrap();
    assert!(!changed);
    assert_eq!(config.len(), 5);
}

#[test]
fn test_replace_parent_updates_children_identity() {
    let mut config = eos();
    config
        .replace(
            &["interface Ethernet2"],
            "interface Ethernet20",
            &[],
            ReplaceOptions::default(),
        )
        .unwrap();
    assert!(config.find(&["interface Ethernet20", "shutdown"]).is_some());
    assert!(config.find(&["interface Ethernet2", "shutdown"]).is_none());
}

#[test]
fn test_replace_invalid_pattern() {
    let mut config = eos();
    let err = config
        .replace(&["(unclosed"], "x", &[], ReplaceOptions::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));
}
