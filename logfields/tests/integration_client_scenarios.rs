//! Client-side scenarios: how a logging pipeline consumes params.
//!
//! The crate only tags params; these tests play the part of a pipeline that
//! masks or drops values by sensitivity, logs RPC arguments of mixed types,
//! and renders params as JSON for a structured sink.

use logfields::{AnyLogFields, LogFields, MetadataCache, Param, ParamValue, Sensitivity};

#[derive(LogFields)]
pub struct CreateUser {
    pub email: String,
    #[sensitive]
    pub phone: Option<String>,
    #[sensitive(secretive)]
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(LogFields)]
pub struct ChargeCard {
    pub customer_id: u64,
    #[sensitive(secretive)]
    pub card_number: String,
    pub amount_cents: i64,
}

/// A pipeline policy: sensitive values are masked, secretive ones dropped.
fn render(params: &[Param]) -> Vec<String> {
    params
        .iter()
        .filter_map(|param| match param.sensitivity {
            Sensitivity::None => Some(format!("{}={}", param.name, param.value)),
            Sensitivity::Sensitive => Some(format!("{}=***", param.name)),
            _ => None,
        })
        .collect()
}

fn create_user() -> CreateUser {
    CreateUser {
        email: "ada@example.com".into(),
        phone: Some("+44 20 7946 0000".into()),
        password: "hunter2".into(),
        roles: vec!["admin".into(), "billing".into()],
    }
}

#[test]
fn test_pipeline_masks_by_sensitivity() {
    let params = logfields::parse_into_params(&create_user());
    assert_eq!(
        render(&params),
        [
            "email=ada@example.com",
            "phone=***",
            "roles=[admin, billing]"
        ]
    );
}

#[test]
fn test_params_keep_raw_values_for_the_consumer() {
    let params = logfields::parse_into_params(&create_user());
    let password = params.iter().find(|param| param.name == "password").unwrap();
    assert_eq!(password.value.as_str(), Some("hunter2"));
    assert!(password.sensitivity > Sensitivity::Sensitive);
}

#[test]
fn test_rpc_arguments_of_mixed_types() {
    let cache = MetadataCache::new();
    let calls: Vec<(&str, Box<dyn AnyLogFields>)> = vec![
        ("CreateUser", Box::new(create_user()) as Box<dyn AnyLogFields>),
        (
            "ChargeCard",
            Box::new(ChargeCard {
                customer_id: 77,
                card_number: "4111111111111111".into(),
                amount_cents: 1999,
            }),
        ),
    ];

    let lines: Vec<String> = calls
        .iter()
        .map(|(method, args)| {
            let params = cache.parse_dyn(args.as_ref());
            format!("{method} {}", render(&params).join(" "))
        })
        .collect();

    assert_eq!(
        lines,
        [
            "CreateUser email=ada@example.com phone=*** roles=[admin, billing]",
            "ChargeCard customer_id=77 amount_cents=1999",
        ]
    );
    assert!(cache.metadata::<ChargeCard>().get("card_number").is_some());
}

#[test]
fn test_schema_introspection_without_instances() {
    let schema: Vec<(&str, Sensitivity)> = logfields::extract_metadata::<ChargeCard>()
        .iter()
        .map(|descriptor| (descriptor.name(), descriptor.sensitivity()))
        .collect();
    assert_eq!(
        schema,
        [
            ("customer_id", Sensitivity::None),
            ("card_number", Sensitivity::Secretive),
            ("amount_cents", Sensitivity::None),
        ]
    );
}

#[test]
fn test_absent_optional_is_null() {
    let user = CreateUser {
        phone: None,
        ..create_user()
    };
    let params = logfields::parse_into_params(&user);
    assert_eq!(params[1].value, ParamValue::Null);
    assert_eq!(params[1].sensitivity, Sensitivity::Sensitive);
}

#[cfg(feature = "serde")]
mod json {
    use serde_json::json;

    use super::{create_user, ChargeCard};

    #[test]
    fn test_params_render_as_flat_object() {
        let params = logfields::parse_into_params(&ChargeCard {
            customer_id: 5,
            card_number: "4111".into(),
            amount_cents: -10,
        });
        assert_eq!(
            logfields::params_to_json(&params),
            json!({ "customer_id": 5, "card_number": "4111", "amount_cents": -10 })
        );
    }

    #[test]
    fn test_params_serialize_with_sensitivity() {
        let params = logfields::parse_into_params(&create_user());
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value[2],
            json!({ "name": "password", "value": "hunter2", "sensitivity": "secretive" })
        );
        assert_eq!(value[3]["value"], json!(["admin", "billing"]));
    }
}
