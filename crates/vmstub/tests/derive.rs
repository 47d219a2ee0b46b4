// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;

use vmstub::{
    Describe, EmitOptions, LineEnding, ListHint, Marker, MemberDef, Schema, TypeCollector,
    TypeDef, TypeRef, ViewDisplay, ViewModel, ViewModelBuilder,
};

#[derive(ViewModel)]
#[allow(dead_code)]
struct Address {
    #[view_model(export)]
    city: String,
    zip: u32,
}

#[derive(ViewModel)]
#[allow(dead_code)]
struct Person {
    #[view_model(export)]
    name: String,
    #[view_model(export, rename = "birthDate")]
    birth_date: chrono::NaiveDate,
    #[view_model(export)]
    tags: Vec<String>,
    #[view_model(export, own_export)]
    address: Address,
    #[view_model(skip)]
    cache: HashMap<String, String>,
}

#[test]
fn test_derived_schema_matches_hand_built() {
    let mut schema = Schema::new();
    let root = schema.register::<Person>();
    assert_eq!(root, TypeRef::named("Person"));

    let expected = TypeDef::record("Person")
        .with_member(
            MemberDef::new("name", TypeRef::named("string")).with_marker(Marker::ExportToViewModel),
        )
        .with_member(
            MemberDef::new("birthDate", TypeRef::named("datetime"))
                .with_marker(Marker::ExportToViewModel),
        )
        .with_member(
            MemberDef::new("tags", TypeRef::list(TypeRef::named("string")))
                .with_marker(Marker::ExportToViewModel),
        )
        .with_member(
            MemberDef::new("address", TypeRef::named("Address"))
                .with_marker(Marker::ExportToViewModel)
                .with_marker(Marker::RequiresOwnExport),
        );
    assert_eq!(schema.get("Person"), Some(&expected));

    let address = schema.get("Address").unwrap();
    assert_eq!(address.members.len(), 2);
    assert!(address.members[0].has_marker(Marker::ExportToViewModel));
    assert!(address.members[1].markers.is_empty());
    assert!(schema.validate().is_ok());
}

#[test]
fn test_derived_person_stub() {
    let schema = Schema::of::<Person>();
    let text = ViewModelBuilder::new(&schema)
        .with_options(EmitOptions {
            line_ending: LineEnding::Lf,
        })
        .build(&Person::type_ref(), Some("PersonModel"), None)
        .unwrap();

    assert!(text.contains(concat!(
        "var PersonModel = function(){ \n",
        "     return {\n",
        "        name: \"\",\n",
        "        birthDate: new Date(),\n",
        "        tags: [],\n",
        "        address: { \n",
        "            city: \"\"\n",
        "        }\n",
        "    }\n",
        "}\n",
    )));
}

#[test]
fn test_derived_collection() {
    let schema = Schema::of::<Person>();
    let found = TypeCollector::new(&schema)
        .collect(&Person::type_ref(), Marker::RequiresOwnExport)
        .unwrap();
    assert_eq!(found, vec![TypeRef::named("Address")]);
}

#[derive(ViewModel)]
#[allow(dead_code)]
struct Folder {
    #[view_model(export)]
    title: String,
    #[view_model(own_export)]
    parent: Option<Box<Folder>>,
    #[view_model(own_export)]
    children: Vec<Folder>,
}

#[test]
fn test_recursive_type_registers_once() {
    let schema = Schema::of::<Folder>();
    let folder = schema.get("Folder").unwrap();
    assert_eq!(folder.members[1].ty.to_string(), "option<Folder>");
    assert_eq!(folder.members[2].ty.to_string(), "list<Folder>");

    let found = TypeCollector::new(&schema)
        .collect(&Folder::type_ref(), Marker::RequiresOwnExport)
        .unwrap();
    assert_eq!(found, vec![TypeRef::named("Folder")]);
}

#[derive(ViewModel)]
#[allow(dead_code)]
struct CustomerMetadata {
    #[view_model(export, display = "Customer name")]
    name: String,
    #[view_model(
        export,
        display = "Orders",
        singular = "Order",
        list_hint = "use_separator",
        separator = "; "
    )]
    orders: Vec<String>,
    #[view_model(view, display = "Nickname", option_display = "(none)")]
    nickname: Option<String>,
}

#[derive(ViewModel)]
#[view_model(name = "Client", metadata = CustomerMetadata, display = "Client record")]
#[allow(dead_code)]
struct Customer {
    id: i64,
    name: String,
    orders: Vec<String>,
    nickname: Option<String>,
}

#[test]
fn test_container_options() {
    let schema = Schema::of::<Customer>();
    assert_eq!(Customer::type_ref(), TypeRef::named("Client"));
    assert!(!schema.contains("Customer"));

    let client = schema.get("Client").unwrap();
    assert_eq!(client.metadata, vec!["CustomerMetadata".to_string()]);
    assert_eq!(client.display, Some(ViewDisplay::new("Client record")));
    // The companion is registered alongside the type.
    assert!(schema.contains("CustomerMetadata"));
}

#[test]
fn test_display_options() {
    let schema = Schema::of::<CustomerMetadata>();
    let def = schema.get("CustomerMetadata").unwrap();

    assert_eq!(def.members[0].display, Some(ViewDisplay::new("Customer name")));
    assert_eq!(
        def.members[1].display,
        Some(
            ViewDisplay::new("Orders")
                .with_singular("Order")
                .with_list_hint(ListHint::UseSeparator)
                .with_separator("; ")
        )
    );
    let nickname = &def.members[2];
    assert!(nickname.has_marker(Marker::ExportToView));
    assert!(!nickname.has_marker(Marker::ExportToViewModel));
    assert_eq!(
        nickname.display.as_ref().and_then(|d| d.option_display_name.as_deref()),
        Some("(none)")
    );
}

#[test]
fn test_metadata_companion_drives_stub() {
    let schema = Schema::of::<Customer>();
    let text = ViewModelBuilder::new(&schema)
        .with_options(EmitOptions {
            line_ending: LineEnding::Lf,
        })
        .build(&Customer::type_ref(), None, None)
        .unwrap();

    assert!(text.contains("For Model Type - Client   "));
    assert!(text.contains("        name: \"\",\n        orders: []\n    }\n"));
    assert!(!text.contains("id:"));
    assert!(!text.contains("nickname"));
}

#[derive(ViewModel)]
#[allow(dead_code)]
struct Empty;

#[test]
fn test_unit_struct() {
    let schema = Schema::of::<Empty>();
    assert!(schema.get("Empty").unwrap().members.is_empty());
}
