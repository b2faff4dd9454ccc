//! Behavioural tests for group and option registration.

use optree::{DeclarationError, OptionTree};
use rstest::rstest;

fn tree_with_net() -> (OptionTree, optree::GroupId) {
    let mut tree = OptionTree::new();
    let net = tree
        .add_subgroup(tree.root(), "net", "networking")
        .unwrap();
    (tree, net)
}

#[test]
fn duplicate_short_flag_names_prior_owner() {
    let (mut tree, net) = tree_with_net();
    tree.add_option::<bool>(tree.root(), "v,verbose", "chatty output")
        .unwrap();

    let err = tree
        .add_option::<String>(net, "v,vhost", "virtual host")
        .unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::ShortFlagInUse { flag: 'v', .. }
    ));
    assert_eq!(
        err.to_string(),
        "short flag 'v' already used by option 'verbose'"
    );
}

#[test]
fn short_flag_conflicts_are_tree_wide() {
    let (mut tree, net) = tree_with_net();
    tree.add_option::<String>(net, "c,cert", "certificate path")
        .unwrap();

    let err = tree
        .add_option::<bool>(tree.root(), "c,colour", "coloured output")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "short flag 'c' already used by option 'net.cert'"
    );
}

#[test]
fn duplicate_long_name_in_group_reports_full_name() {
    let (mut tree, net) = tree_with_net();
    let tls = tree.add_subgroup(net, "tls", "TLS settings").unwrap();
    tree.add_option::<String>(tls, "cert", "certificate path")
        .unwrap();

    let err = tree
        .add_option::<String>(tls, "cert", "another certificate")
        .unwrap_err();
    assert!(matches!(err, DeclarationError::DuplicateOption { .. }));
    assert_eq!(err.to_string(), "option 'net.tls.cert' already specified");
}

#[test]
fn same_long_name_is_allowed_in_sibling_groups() {
    let (mut tree, net) = tree_with_net();
    let log = tree
        .add_subgroup(tree.root(), "log", "logging")
        .unwrap();
    tree.add_option::<String>(net, "level", "network log level")
        .unwrap();
    tree.add_option::<String>(log, "level", "log level").unwrap();

    assert!(tree.option(net, "level").is_some());
    assert!(tree.option(log, "level").is_some());
}

#[rstest]
#[case("")]
#[case("9net")]
#[case("_net")]
#[case("ne t")]
fn invalid_group_names_are_rejected(#[case] name: &str) {
    let mut tree = OptionTree::new();
    let err = tree.add_subgroup(tree.root(), name, "bad").unwrap_err();
    assert!(matches!(err, DeclarationError::InvalidName { .. }));
}

#[test]
fn duplicate_subgroup_name_is_rejected() {
    let (mut tree, _net) = tree_with_net();
    let err = tree
        .add_subgroup(tree.root(), "net", "again")
        .unwrap_err();
    assert_eq!(err.to_string(), "group 'net' already exists");
}

#[test]
fn empty_description_is_rejected() {
    let mut tree = OptionTree::new();
    let err = tree
        .add_option::<bool>(tree.root(), "v,verbose", "")
        .unwrap_err();
    assert!(matches!(err, DeclarationError::EmptyDescription));
}

#[test]
fn empty_designator_is_rejected() {
    let mut tree = OptionTree::new();
    let err = tree
        .add_option::<bool>(tree.root(), "", "chatty output")
        .unwrap_err();
    assert!(matches!(err, DeclarationError::EmptyDesignator));
}

#[rstest]
#[case("vv,verbose")]
#[case(",verbose")]
#[case("v,9bad")]
#[case("9bad")]
fn malformed_designators_are_rejected(#[case] designator: &str) {
    let mut tree = OptionTree::new();
    let err = tree
        .add_option::<String>(tree.root(), designator, "broken")
        .unwrap_err();
    assert!(matches!(err, DeclarationError::MalformedDesignator { .. }));
}

#[test]
fn find_short_resolves_across_the_tree() {
    let (mut tree, net) = tree_with_net();
    tree.add_option::<u16>(net, "p,port", "listen port").unwrap();

    let (group, option) = tree.find_short('p').unwrap();
    assert_eq!(group, net);
    assert_eq!(option.meta().name(), "port");
    assert!(tree.find_short('q').is_none());
}

#[test]
fn registration_failure_stores_nothing() {
    let (mut tree, net) = tree_with_net();
    tree.add_option::<bool>(tree.root(), "v,verbose", "chatty output")
        .unwrap();
    tree.add_option::<String>(net, "v,vhost", "virtual host")
        .unwrap_err();

    assert!(tree.option(net, "vhost").is_none());
}

#[test]
fn metadata_is_exposed_through_the_entry() {
    let mut tree = OptionTree::new();
    tree.add_option::<u16>(tree.root(), "p,port", "listen port")
        .unwrap();

    let meta = tree.option(tree.root(), "port").unwrap().meta();
    assert_eq!(meta.name(), "port");
    assert_eq!(meta.description(), "listen port");
    assert_eq!(meta.short_flag(), Some('p'));
    assert_eq!(meta.num_args(), 1);
    assert!(meta.required());
    assert!(!meta.repeatable());
}
