//! Integration tests for grouped checkbox selection.

use std::sync::Arc;

use choicekit::checkbox_group::{
    AggregateState, CheckState, CheckboxGroup, CheckboxOption, GroupCheckBox, GroupConfig,
    OptionNode, OptionSpec, OptionValue, OriginatingEvent, PartialOption, SelectionValue,
    TriggerType, ValueChange, normalize_options,
};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("choicekit=debug")
        .with_test_writer()
        .try_init();
}

fn numbers(values: &[i64]) -> Vec<OptionValue> {
    values.iter().map(|&v| OptionValue::Int(v)).collect()
}

fn record(group: &CheckboxGroup) -> Arc<Mutex<Vec<ValueChange>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();
    group
        .value_changed()
        .connect(move |change| changes_clone.lock().push(change.clone()));
    changes
}

#[test]
fn test_partial_and_full_selection() {
    setup();
    let options = normalize_options(
        &numbers(&[1, 2, 3]).into_iter().map(OptionSpec::from).collect::<Vec<_>>(),
        false,
    );

    let partial = AggregateState::compute(&options, &SelectionValue::List(numbers(&[1, 2])), None);
    assert!(partial.indeterminate);
    assert!(!partial.all_selected);
    assert_eq!(partial.intersection_count, 2);

    let full = AggregateState::compute(&options, &SelectionValue::List(numbers(&[1, 2, 3])), None);
    assert!(full.all_selected);
    assert!(!full.indeterminate);
}

#[test]
fn test_select_all_then_none() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2, 3]))
        .with_default_value(numbers(&[2]))
        .build();

    group.toggle_all(true, OriginatingEvent::Click);
    group.toggle_all(false, OriginatingEvent::Click);
    assert_eq!(group.value(), SelectionValue::empty());
}

#[test]
fn test_toggle_one_round_trip() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2, 3]))
        .with_default_value(numbers(&[3, 1]))
        .build();
    let original = group.value();

    group.toggle_one(&2.into(), true, OriginatingEvent::Click);
    assert_eq!(group.value(), SelectionValue::List(numbers(&[3, 1, 2])));
    group.toggle_one(&2.into(), false, OriginatingEvent::Click);
    assert_eq!(group.value(), original);
}

#[test]
fn test_max_stops_select_all_in_option_order() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options([
            OptionSpec::Partial(PartialOption {
                label: Some("All".into()),
                check_all: true,
                ..Default::default()
            }),
            OptionValue::from("a").into(),
            OptionValue::from("b").into(),
            OptionValue::from("c").into(),
        ])
        .with_max(2)
        .build();
    let changes = record(&group);

    group.dispatch(true, true, OriginatingEvent::Click, None);

    assert_eq!(group.value(), SelectionValue::from(["a", "b"]));
    let changes = changes.lock();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].context.trigger, TriggerType::Check);
    assert_eq!(changes[0].context.current, None);
}

#[test]
fn test_non_list_value_does_not_emit() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2]))
        .with_value(SelectionValue::Scalar(1.into()))
        .build();
    let changes = record(&group);

    assert!(group.toggle_one(&2.into(), true, OriginatingEvent::Click).is_none());
    assert!(changes.lock().is_empty());
    assert_eq!(group.value(), SelectionValue::Scalar(1.into()));
}

#[test]
fn test_disabled_inheritance_is_one_shot() {
    setup();
    let spec = OptionSpec::Partial(PartialOption {
        value: Some("a".into()),
        ..Default::default()
    });

    let disabled_group = CheckboxGroup::builder()
        .with_disabled(true)
        .with_options([spec.clone()])
        .build();
    let options = disabled_group.options();
    assert!(options[0].disabled);

    // Records already normalized keep the flag they were given.
    let enabled_group = CheckboxGroup::builder().with_options([spec]).build();
    assert!(!enabled_group.options()[0].disabled);
    assert!(options[0].disabled);
}

#[test]
fn test_controlled_group_round_trip_through_consumer() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2, 3]))
        .with_value(SelectionValue::empty())
        .build();

    // The consumer stores the value and feeds it back in.
    let store = Arc::new(Mutex::new(SelectionValue::empty()));
    let weak = Arc::downgrade(&group);
    let store_clone = store.clone();
    group.value_changed().connect(move |change| {
        *store_clone.lock() = change.value.clone();
        if let Some(group) = weak.upgrade() {
            group.set_value(change.value.clone()).unwrap();
        }
    });

    let context = group.context();
    let all = GroupCheckBox::new(CheckboxOption::select_all("All"), context.clone());
    let two = GroupCheckBox::new(CheckboxOption::new(2, "Two"), context);

    two.click(OriginatingEvent::Click);
    assert_eq!(*store.lock(), SelectionValue::List(numbers(&[2])));
    assert_eq!(all.check_state(), CheckState::PartiallyChecked);

    all.click(OriginatingEvent::Click);
    assert_eq!(group.value(), SelectionValue::List(numbers(&[1, 2, 3])));
    assert_eq!(all.check_state(), CheckState::Checked);
    assert!(two.is_checked());
}

#[test]
fn test_interleaved_events_see_completed_values() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2, 3]))
        .build();
    let changes = record(&group);

    for id in [1, 2, 3] {
        group.toggle_one(&id.into(), true, OriginatingEvent::Click);
    }

    let changes = changes.lock();
    assert_eq!(changes[0].value, SelectionValue::List(numbers(&[1])));
    assert_eq!(changes[1].value, SelectionValue::List(numbers(&[1, 2])));
    assert_eq!(changes[2].value, SelectionValue::List(numbers(&[1, 2, 3])));
}

#[test]
fn test_unknown_identifiers_are_preserved() {
    setup();
    let group = CheckboxGroup::builder()
        .with_options(numbers(&[1, 2]))
        .with_default_value(numbers(&[9]))
        .build();

    group.toggle_one(&1.into(), true, OriginatingEvent::Click);
    assert_eq!(group.value(), SelectionValue::List(numbers(&[9, 1])));
    let state = group.state();
    assert_eq!(state.intersection_count, 1);
    assert!(state.indeterminate);
}

#[test]
fn test_markup_group_from_config() {
    setup();
    let group = GroupConfig::from_json_str(r#"{"name": "tags", "defaultValue": ["x"]}"#)
        .unwrap()
        .build();

    let nodes = [
        OptionNode::new().attr("check-all", "").attr("label", "Everything"),
        OptionNode::new().attr("value", "x").attr("label", "X"),
        OptionNode::new().attr("value", "y").attr("label", "Y"),
    ];
    let items = group.render_nodes(&nodes);

    assert_eq!(items.len(), 3);
    assert!(items[0].indeterminate);
    assert!(items[1].checked);
    assert!(!items[2].checked);

    let context = group.context();
    assert_eq!(context.current_name(), "tags");
    assert!(context.indeterminate());
    assert!(!context.all_selected());
}
