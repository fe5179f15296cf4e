// SPDX-License-Identifier: MPL-2.0
use indicator_stack::config::{self, Config, InteractionConfig, StackConfig};
use indicator_stack::{ActionKind, Activation, DismissPolicy, Indicator, Indicators};
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::sleep;

fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value)
}

#[tokio::test(start_paused = true)]
async fn refreshed_indicator_expires_from_the_refresh() {
    let indicators = Indicators::new(&Config::default()).expect("runtime available");
    let indicator = Indicator::new("a", "Copied").dismiss_after(secs(5.0));

    indicators.display(indicator.clone());
    sleep(secs(1.0)).await;
    indicators.display(indicator);

    sleep(secs(4.5)).await;
    assert!(indicators.contains("a"), "visible at t=5.5s");

    sleep(secs(1.0)).await;
    assert!(!indicators.contains("a"), "gone by t=6.5s");
}

#[tokio::test(start_paused = true)]
async fn update_does_not_inherit_the_old_countdown() {
    let indicators = Indicators::new(&Config::default()).expect("runtime available");
    indicators.display(Indicator::new("a", "Uploading").dismiss_after(secs(1.0)));
    indicators.display(Indicator::new("a", "Upload paused").manual());

    sleep(secs(30.0)).await;
    let snapshot = indicators.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(
        snapshot.get("a").unwrap().indicator.title(),
        "Upload paused"
    );
}

#[tokio::test(start_paused = true)]
async fn expanded_indicator_waits_for_collapse() {
    let indicators = Indicators::new(&Config::default()).expect("runtime available");
    indicators.display(
        Indicator::new("err", "Sync failed")
            .with_expanded_text("Server returned 503")
            .with_action(ActionKind::ToggleExpansion)
            .dismiss_after(secs(2.0)),
    );

    sleep(secs(1.0)).await;
    assert_eq!(indicators.activate("err"), Some(Activation::Expanded));

    sleep(secs(120.0)).await;
    assert!(indicators.is_expanded("err"));

    assert_eq!(indicators.activate("err"), Some(Activation::Collapsed));
    sleep(secs(1.5)).await;
    assert!(indicators.contains("err"));
    sleep(secs(1.0)).await;
    assert!(!indicators.contains("err"));
}

#[tokio::test(start_paused = true)]
async fn stack_keeps_insertion_order_and_unique_ids() {
    let indicators = Indicators::new(&Config::default()).expect("runtime available");
    for name in ["i1", "i1", "i2", "i2", "i3", "i1"] {
        indicators.display(Indicator::new(name, name.to_uppercase()).manual());
    }

    let snapshot = indicators.snapshot();
    let ids: Vec<&str> = snapshot.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["i1", "i2", "i3"]);

    let scales: Vec<f32> = snapshot.iter().map(|entry| entry.scale).collect();
    assert!(scales.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test(start_paused = true)]
async fn mixed_policies_expire_independently() {
    let indicators = Indicators::new(&Config::default()).expect("runtime available");
    indicators.display(Indicator::new("short", "Short").dismiss_after(secs(1.0)));
    indicators.display(Indicator::new("long", "Long").dismiss_after(secs(3.0)));
    indicators.display(Indicator::new("sticky", "Sticky").manual());
    indicators.display(
        Indicator::new("zero", "Zero").with_dismiss_policy(DismissPolicy::from_secs_f64(0.0)),
    );

    sleep(secs(1.5)).await;
    assert!(!indicators.contains("short"));
    assert!(indicators.contains("long"));

    sleep(secs(2.0)).await;
    let snapshot = indicators.snapshot();
    let ids: Vec<&str> = snapshot.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["sticky", "zero"]);

    indicators.dismiss_all();
    assert!(!indicators.dismiss("sticky"));
    assert!(indicators.snapshot().is_empty());
}

#[tokio::test]
async fn settings_file_configures_engine() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let config = Config {
        interaction: InteractionConfig {
            haptics_enabled: Some(false),
        },
        stack: StackConfig {
            depth_step: Some(0.25),
        },
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let indicators = Indicators::new(&loaded).expect("runtime available");
    indicators.display(Indicator::new("a", "A").manual());
    indicators.display(Indicator::new("b", "B").manual());

    assert!(!indicators.haptics_enabled());
    let snapshot = indicators.snapshot();
    assert!((snapshot.get("a").unwrap().scale - 0.75).abs() < 1e-6);

    dir.close().expect("Failed to close temporary directory");
}
