//! Post-processing of rendered items.
//!
//! Resource requests and limits in source templates are dropped from
//! `ClowdApp` items; the target environment manages them.

use serde_json::Value;

use crate::template::RenderedItem;

/// Kind whose resource settings are stripped. Matched case-sensitively.
pub const CLOWDAPP_KIND: &str = "ClowdApp";

/// Remove `resources` from every ClowdApp deployment `podSpec` and pod.
///
/// Items of other kinds and missing fields are left alone.
pub fn strip_resource_config(items: &mut [RenderedItem]) {
    for item in items.iter_mut().filter(|i| i.is_kind(CLOWDAPP_KIND)) {
        let Some(spec) = item.spec_mut() else {
            continue;
        };

        if let Some(Value::Array(deployments)) = spec.get_mut("deployments") {
            for deployment in deployments.iter_mut() {
                if let Some(Value::Object(pod_spec)) = deployment.get_mut("podSpec") {
                    pod_spec.remove("resources");
                }
            }
        }

        if let Some(Value::Array(pods)) = spec.get_mut("pods") {
            for pod in pods.iter_mut().filter_map(Value::as_object_mut) {
                pod.remove("resources");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> RenderedItem {
        RenderedItem::try_from(value).unwrap()
    }

    #[test]
    fn strips_deployment_pod_spec_resources() {
        let mut items = vec![item(json!({
            "kind": "ClowdApp",
            "spec": {
                "deployments": [
                    {
                        "name": "api",
                        "podSpec": {
                            "image": "quay.io/org/api:abc",
                            "resources": { "limits": { "cpu": "1" } }
                        }
                    },
                    { "name": "worker", "podSpec": { "image": "quay.io/org/worker:abc" } }
                ]
            }
        }))];

        strip_resource_config(&mut items);

        let deployments = &items[0].spec().unwrap()["deployments"];
        assert!(deployments[0]["podSpec"].get("resources").is_none());
        assert_eq!(deployments[0]["podSpec"]["image"], "quay.io/org/api:abc");
        assert_eq!(deployments[1]["podSpec"]["image"], "quay.io/org/worker:abc");
    }

    #[test]
    fn strips_pod_resources() {
        let mut items = vec![item(json!({
            "kind": "ClowdApp",
            "spec": {
                "pods": [
                    { "name": "api", "resources": { "requests": { "memory": "1Gi" } } }
                ]
            }
        }))];

        strip_resource_config(&mut items);

        let pods = &items[0].spec().unwrap()["pods"];
        assert!(pods[0].get("resources").is_none());
        assert_eq!(pods[0]["name"], "api");
    }

    #[test]
    fn other_kinds_are_untouched() {
        let original = json!({
            "kind": "Deployment",
            "spec": {
                "deployments": [{ "podSpec": { "resources": { "limits": {} } } }],
                "pods": [{ "resources": {} }]
            }
        });
        let mut items = vec![item(original.clone())];

        strip_resource_config(&mut items);

        assert_eq!(items[0].clone().into_value(), original);
    }

    #[test]
    fn kind_match_is_case_sensitive() {
        let original = json!({
            "kind": "clowdapp",
            "spec": { "pods": [{ "resources": {} }] }
        });
        let mut items = vec![item(original.clone())];

        strip_resource_config(&mut items);

        assert_eq!(items[0].clone().into_value(), original);
    }

    #[test]
    fn missing_fields_are_a_no_op() {
        let mut items = vec![
            item(json!({ "kind": "ClowdApp" })),
            item(json!({ "kind": "ClowdApp", "spec": {} })),
            item(json!({ "kind": "ClowdApp", "spec": { "deployments": [{ "name": "x" }] } })),
        ];

        strip_resource_config(&mut items);

        assert_eq!(items.len(), 3);
    }
}
