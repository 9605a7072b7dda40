use wookie_core::gateway::Gateway;
use wookie_core::manifest::{
    Content, FeatureDecl, Icon, LocalizedText, ParamDecl, PreferenceDecl, WidgetManifest,
};
use wookie_core::model::{Participant, Preference, SharedData, WidgetInstance};

/// Manifest with a name, content URL and the given guid; no preferences or features
#[allow(dead_code)]
pub fn simple_manifest(guid: &str, title: &str) -> WidgetManifest {
    WidgetManifest {
        identifier: guid.to_string(),
        version: Some("1.0".to_string()),
        author: Some("Test Author".to_string()),
        width: 320,
        height: 200,
        names: vec![LocalizedText {
            lang: Some("en".to_string()),
            text: title.to_string(),
        }],
        descriptions: vec![LocalizedText {
            lang: None,
            text: format!("{} description", title),
        }],
        icons: vec![Icon {
            src: "icon.png".to_string(),
        }],
        content: Content {
            src: "index.html".to_string(),
        },
        ..Default::default()
    }
}

/// Manifest with 2 preferences and 1 feature carrying 3 params
#[allow(dead_code)]
pub fn full_manifest(guid: &str) -> WidgetManifest {
    let mut manifest = simple_manifest(guid, "Weather");
    manifest.preferences = vec![
        PreferenceDecl {
            name: "location".to_string(),
            value: Some("Oxford".to_string()),
            readonly: false,
        },
        PreferenceDecl {
            name: "units".to_string(),
            value: None,
            readonly: true,
        },
    ];
    manifest.features = vec![FeatureDecl {
        name: "http://wave.google.com".to_string(),
        required: true,
        params: vec![
            param("mode", "live"),
            param("refresh", "60"),
            param("theme", "dark"),
        ],
    }];
    manifest
}

fn param(name: &str, value: &str) -> ParamDecl {
    ParamDecl {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Create one instance of a widget with a preference, shared data entry and participant
///
/// Bypasses the admin facade; instances are created by the runtime, not by admin operations.
#[allow(dead_code)]
pub fn seed_instance<G: Gateway>(gw: &mut G, widget_id: i64, user: &str) -> i64 {
    let instance_id = gw
        .save(&mut WidgetInstance::new(widget_id, user, "test-key"))
        .unwrap();
    gw.save(&mut Preference::new(instance_id, "colour", "blue"))
        .unwrap();
    gw.save(&mut SharedData::new(instance_id, "shared-1", "score", "10"))
        .unwrap();
    gw.save(&mut Participant::new(instance_id, user, "Test User"))
        .unwrap();
    instance_id
}
