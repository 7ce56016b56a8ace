/* Rust Code Generation Tests
 *
 * These tests run whole libraries through classification and rendering and
 * check the emitted bindings for both the provider and the consumer side.
 */

use cidl_gen::classify::descriptor::Direction;
use cidl_gen::codegen::rust_gen::emit_enumeration;
use cidl_gen::codegen::shared::ir::EnumKind;
use cidl_gen::{build_ir, generate, ClassifyError, GenError, GeneratorOptions, NamingTables};
use cidl_types::{Library, ModelFile};
use std::collections::HashMap;
use std::fs;
use std::process::Command;

const THERMO_MODEL: &str = r#"
libraries:
  - name: Thermo
    uuid: "00112233-4455-6677-8899-aabbccddeeff"
    category-ids:
      - { name: PropertyPackage, uuid: "10000000-0000-0000-0000-000000000001" }
    enumerations:
      - name: Color
        items:
          - { name: RED, value: 1 }
          - { name: GREEN, value: 2 }
          - { name: BLUE, value: 4 }
      - name: Status
        items:
          - { name: OK, value: 0 }
          - { name: WARNING, value: 1 }
          - { name: ERROR, value: 2 }
    interfaces:
      - name: IPhase
        uuid: "20000000-0000-0000-0000-000000000001"
        methods:
          - name: Temperature
            attributes: [property_get]
            return-type: { kind: result }
            arguments:
              - { name: value, attributes: [out, retval], data-type: { kind: real } }
          - name: Describe
            return-type: { kind: result }
            arguments:
              - { name: label, attributes: [in], data-type: { kind: string } }
              - { name: status, attributes: [out, retval], data-type: { kind: enumeration, name: Status } }
          - name: Split
            return-type: { kind: result }
            arguments:
              - { name: count, attributes: [out, retval], data-type: { kind: integer } }
              - { name: child, attributes: [out], data-type: { kind: interface, name: IPhase } }
          - name: Inspect
            return-type: { kind: result }
            arguments:
              - { name: clone, attributes: [out], data-type: { kind: interface, name: IPhase } }
              - { name: state, attributes: [out, retval], data-type: { kind: enumeration, name: Status } }
          - name: Scale
            return-type: { kind: result }
            arguments:
              - { name: p, attributes: [in], data-type: { kind: real } }
              - { name: myself, attributes: [in], data-type: { kind: interface, name: IPhase } }
          - name: Show
            return-type: { kind: result }
            arguments:
              - { name: parent, attributes: [in], data-type: { kind: window-id } }
              - { name: names, attributes: [out], data-type: { kind: array-string } }
      - name: ICollection
        uuid: "20000000-0000-0000-0000-000000000002"
        template-args: [T]
        methods:
          - name: Item
            return-type: { kind: result }
            arguments:
              - { name: index, attributes: [in], data-type: { kind: integer } }
              - { name: item, attributes: [out], data-type: { kind: template-argument, template-index: 0 } }
          - name: Add
            return-type: { kind: result }
            arguments:
              - { name: item, attributes: [in], data-type: { kind: template-argument, template-index: 0 } }
"#;

fn load(model: &str) -> Vec<Library> {
    let file: ModelFile = serde_yml::from_str(model).expect("model should parse");
    file.libraries
}

fn generate_default(libraries: &[Library]) -> Result<String, GenError> {
    let resolver: HashMap<String, usize> = HashMap::new();
    generate(libraries, &resolver, &NamingTables::new(), &GeneratorOptions::default())
}

/* Single-method library used by the error tests */
fn method_model(arguments: &str) -> String {
    format!(
        r#"
libraries:
  - name: Thermo
    uuid: "00112233-4455-6677-8899-aabbccddeeff"
    interfaces:
      - name: IThing
        uuid: "20000000-0000-0000-0000-000000000001"
        methods:
          - name: Run
            return-type: {{ kind: result }}
            arguments:
{}
"#,
        arguments
    )
}

#[test]
fn header_and_identifiers() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.starts_with("// This file was generated by cidl2rs\nuse cobia::*;\n"));
    assert!(code.contains("use cobia::cape_smart_pointer::CapeSmartPointer;\n"));
    assert!(code.contains("use std::marker::PhantomData;\n"));
    assert!(code.contains("use std::fmt;\n"));
    assert!(code.contains("use bitflags::bitflags;\n"));
    assert!(code.contains("pub const LIBRARY_ID:CapeUUID=CapeUUID::from_slice(&[0x00u8,0x11u8,0x22u8,"));
    assert!(code.contains("pub const CATEGORYID_PROPERTYPACKAGE:CapeUUID="));
    assert!(code.contains("pub const IPHASE_UUID:CapeUUID="));
    assert!(code.contains("pub const ICOLLECTION_UUID:CapeUUID="));

    let enumerations = code.find("//Enumerations").unwrap();
    let interfaces = code.find("//Interfaces").unwrap();
    assert!(enumerations < interfaces);
}

#[test]
fn enumerations_are_classified() {
    let libraries = load(THERMO_MODEL);
    let ir = build_ir(&libraries, &HashMap::<String, usize>::new(), &NamingTables::new()).unwrap();
    assert_eq!(ir.enumerations[0].kind, EnumKind::BitFlags);
    assert_eq!(ir.enumerations[1].kind, EnumKind::Plain);

    let code = generate_default(&libraries).unwrap();
    assert!(code.contains("\tpub struct Color: u32 {\n\t\tconst Red = 0x1;\n\t\tconst Green = 0x2;\n\t\tconst Blue = 0x4;\n"));
    assert!(code.contains("pub enum Status {\n\tOk = 0,\n\tWarning = 1,\n\tError = 2,\n}"));
    assert!(code.contains("pub const VALUES: [Status; 3] = [Status::Ok,Status::Warning,Status::Error];"));
    assert!(!code.contains("ColorIterator"));
}

#[test]
fn scalar_retval_is_returned_bare() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tfn get_temperature(&mut self) -> Result<CapeReal,COBIAError>;\n"));
    assert!(code.contains("\tpub fn get_temperature(&self) -> Result<CapeReal,COBIAError> {\n"));
    assert!(code.contains("\t\tlet mut value:CapeReal=0.0;\n"));
    assert!(code.contains(
        "((*(*self.interface).vTbl).getTemperature.unwrap())((*self.interface).me,&mut value as *mut CapeReal)"
    ));
    assert!(code.contains("\t\t\tCOBIAERR_NOERROR => Ok(value),\n"));
}

#[test]
fn two_outputs_are_returned_as_tuple() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tfn split(&mut self) -> Result<(CapeInteger,Phase),COBIAError>;\n"));
    assert!(code.contains("\t\tlet mut child: *mut C::Thermo_IPhase=std::ptr::null_mut();\n"));
    assert!(code.contains("&mut child as *mut *mut C::Thermo_IPhase"));
    assert!(code.contains(
        "\t\t\tCOBIAERR_NOERROR => {\n\t\t\t\tlet child=Phase::attach(child);\n\t\t\t\tOk((count,child))\n\t\t\t},\n"
    ));

    /* Provider side writes both outputs back */
    assert!(code.contains(
        "\textern \"C\" fn raw_split(me: *mut std::ffi::c_void,count:*mut CapeInteger,child:*mut *mut C::Thermo_IPhase) -> cobia::C::CapeResult {\n"
    ));
    assert!(code.contains("\t\tif count.is_null()||child.is_null() {\n\t\t\treturn COBIAERR_NULLPOINTER;\n\t\t}\n"));
    assert!(code.contains("\t\t\tOk((_count,_child)) => {\n\t\t\t\tunsafe{*count=_count;}\n\t\t\t\tunsafe{*child=_child.detach();}\n"));
}

#[test]
fn interface_outputs_are_attached_before_validation() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    let start = code.find("\tpub fn inspect(&self) -> Result<(Phase,Status),COBIAError> {").unwrap();
    let accessor = &code[start..];
    let attach = accessor.find("\t\t\t\tlet clone=Phase::attach(clone);\n").unwrap();
    let validate = accessor.find("\t\t\t\tlet state=match Status::from(state) {\n").unwrap();
    let done = accessor.find("\t\t\t\tOk((clone,state))\n").unwrap();
    assert!(attach < validate);
    assert!(validate < done);
}

#[test]
fn arguments_do_not_shadow_generated_locals() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tfn scale(&mut self,_p:CapeReal,_myself:Phase) -> Result<(),COBIAError>;\n"));
    assert!(code.contains(
        "\textern \"C\" fn raw_scale(me: *mut std::ffi::c_void,_p:CapeReal,_myself:*mut C::Thermo_IPhase) -> cobia::C::CapeResult {\n"
    ));
    assert!(code.contains("\t\tlet _myself=Phase::from_interface_pointer(_myself);\n"));
    assert!(code.contains("\t\tmatch myself.scale(_p,_myself) {\n"));
    assert!(code.contains("\tpub fn scale(&self,_p:CapeReal,_myself:&Phase) -> Result<(),COBIAError> {\n"));
}

#[test]
fn enumeration_retval_is_validated() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tfn describe(&mut self,label:&CapeStringIn) -> Result<Status,COBIAError>;\n"));
    assert!(code.contains(
        "\tpub fn describe<TypeOfLabel:CapeStringProviderIn>(&self,label:&TypeOfLabel) -> Result<Status,COBIAError> {\n"
    ));
    assert!(code.contains("(&label.as_cape_string_in() as *const cobia::C::ICapeString).cast_mut()"));
    assert!(code.contains("\t\t\t\tlet status=match Status::from(status) {\n"));
    assert!(code.contains("None => {return Err(COBIAError::Message(\"Invalid enumeration value\".to_string()));}"));
    assert!(code.contains("\t\tlet label=CapeStringIn::new(&label);\n"));
    assert!(code.contains("\t\t\t\tunsafe{*status=_status as C::Thermo_Status;}\n"));
}

#[test]
fn window_id_and_data_out_conversions() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tfn show(&mut self,parent:CapeWindowId,names:&mut CapeArrayStringOut) -> Result<(),COBIAError>;\n"));
    assert!(code.contains("cobia::CapeWindowIdToRaw(parent)"));
    assert!(code.contains("match myself.show(cobia::CapeWindowIdFromRaw(parent),&mut names) {"));
    assert!(code.contains(
        "\t\tlet mut names=unsafe{*((&names as *const *mut cobia::C::ICapeArrayString) as *mut *mut cobia::C::ICapeArrayString)};\n\t\tlet mut names=CapeArrayStringOut::new(&mut names);\n"
    ));
    assert!(code.contains("\t\tif names.is_null() {\n"));
    assert!(code.contains("\t\t\tOk(_) => COBIAERR_NOERROR,\n"));
}

#[test]
fn generic_interface_binds_template_parameter() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("pub trait ICollection<T:CapeSmartPointer> {\n"));
    assert!(code.contains("\tfn item(&mut self,index:CapeInteger) -> Result<T,COBIAError>;\n"));
    assert!(code.contains("pub trait ICollectionImpl<T:CapeSmartPointer> : ICollection<T> {\n"));
    assert!(code.contains("\ttype T: ICapeInterfaceImpl+ICollectionImpl<T>;\n"));
    assert!(code.contains("#[cape_smart_pointer(ICOLLECTION_UUID)]\npub struct Collection<T:CapeSmartPointer> {\n"));
    assert!(code.contains("\tpub interface: *mut C::Thermo_ICollection,\n\tphantom_t : PhantomData<T>,\n"));
    assert!(code.contains("impl<T:CapeSmartPointer> Collection<T> {\n"));
    assert!(code.contains("\t\t\t\tlet item=cobia::CapeObject::attach(item);\n\t\t\t\tlet item=match T::from_object(&item) {\n"));
    assert!(code.contains("unsafe{*item=_item.detach() as *mut cobia::C::ICapeInterface;}"));
    assert!(code.contains("\t\tlet item=match T::from_object(&cobia::CapeObject::from_interface_pointer(item)) {\n"));
    assert!(code.contains("Err(e) => {return myself.set_last_error(e,\"ICollection::Add\");}"));
}

/* Builds the emitted enumeration in a scratch crate and runs checks against it */
fn run_generated_enumeration(model: &str, checks: &str) -> Result<(), String> {
    let libraries = load(model);
    let resolver: HashMap<String, usize> = HashMap::new();
    let ir = build_ir(&libraries, &resolver, &NamingTables::new()).map_err(|e| e.to_string())?;
    let ctx = GeneratorOptions::default().resolve(&libraries[0]);
    let enumeration = emit_enumeration(&ir.enumerations[0], &ctx);

    let project = tempfile::tempdir().map_err(|e| format!("Failed to create temp dir: {}", e))?;
    fs::write(
        project.path().join("Cargo.toml"),
        "[package]\nname = \"enum_check\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[[bin]]\nname = \"enum_check\"\npath = \"main.rs\"\n",
    )
    .map_err(|e| format!("Failed to write Cargo.toml: {}", e))?;
    let main = format!("#![allow(dead_code)]\nuse std::fmt;\n\n{}\nfn main() {{\n{}}}\n", enumeration, checks);
    fs::write(project.path().join("main.rs"), main).map_err(|e| format!("Failed to write main.rs: {}", e))?;

    let output = Command::new(env!("CARGO"))
        .arg("run")
        .arg("--quiet")
        .arg("--manifest-path")
        .arg(project.path().join("Cargo.toml"))
        .env("CARGO_TARGET_DIR", project.path().join("target"))
        .output()
        .map_err(|e| format!("Failed to run cargo: {}", e))?;
    if !output.status.success() {
        return Err(format!("Generated enumeration failed:\n{}", String::from_utf8_lossy(&output.stderr)));
    }
    Ok(())
}

#[test]
fn generated_plain_enumeration_round_trips_and_iterates() {
    let model = r#"
libraries:
  - name: Thermo
    uuid: "00112233-4455-6677-8899-aabbccddeeff"
    enumerations:
      - name: Status
        items:
          - { name: OK, value: 0 }
          - { name: WARNING, value: 7 }
          - { name: ERROR, value: -2147483648 }
"#;
    let checks = r#"
    let declared = [("Ok", 0), ("Warning", 7), ("Error", i32::MIN)];
    let mut iter = Status::iter();
    for (name, value) in declared {
        let item = iter.next().expect("iterator ended early");
        assert_eq!(item as i32, value);
        assert_eq!(Status::from(value), Some(item));
        assert_eq!(item.to_string(), name);
    }
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    assert_eq!(Status::from(1), None);
    assert_eq!(Status::iter().collect::<Vec<_>>(), Status::VALUES.to_vec());
"#;
    if let Err(message) = run_generated_enumeration(model, checks) {
        panic!("{}", message);
    }
}

#[test]
fn dispatch_table_and_registration() {
    let code = generate_default(&load(THERMO_MODEL)).unwrap();
    assert!(code.contains("\tconst VTABLE: C::Thermo_IPhase_VTable =\n"));
    assert!(code.contains("\t\t\t\taddReference: Some(Self::T::raw_add_reference),\n"));
    assert!(code.contains("\t\t\t\tgetLastError: Some(Self::T::raw_get_last_error),\n"));
    assert!(code.contains("\t\t\tgetTemperature: Some(Self::T::raw_get_temperature),\n"));
    assert!(code.contains("\t\t\tstd::ptr::addr_of!(C::Thermo_IPhase_UUID),\n"));
    assert!(code.contains("\t\t\tvTbl: (&Self::T::VTABLE as *const C::Thermo_IPhase_VTable).cast_mut()\n"));
}

#[test]
fn options_change_generated_paths() {
    let libraries = load(THERMO_MODEL);
    let options = GeneratorOptions {
        support_module: "crate".to_string(),
        example_module: Some("thermo_bindings".to_string()),
        native_module: "ffi".to_string(),
        native_namespace: Some("TH".to_string()),
    };
    let resolver: HashMap<String, usize> = HashMap::new();
    let code = generate(&libraries, &resolver, &NamingTables::new(), &options).unwrap();
    assert!(code.contains("use crate::*;\n"));
    assert!(code.contains("\tpub(crate) interface: *mut ffi::TH_IPhase,\n"));
    assert!(code.contains("/// use thermo_bindings::Status;"));
    assert!(code.contains("\tconst VTABLE: ffi::TH_IPhase_VTable =\n"));
}

#[test]
fn output_is_deterministic() {
    let libraries = load(THERMO_MODEL);
    assert_eq!(generate_default(&libraries).unwrap(), generate_default(&libraries).unwrap());
}

#[test]
fn in_and_out_together_is_rejected() {
    let model = method_model("              - { name: value, attributes: [in, out], data-type: { kind: integer } }");
    match generate_default(&load(&model)) {
        Err(GenError::Argument { interface, method, argument, source, .. }) => {
            assert_eq!(interface, "IThing");
            assert_eq!(method, "Run");
            assert_eq!(argument, "value");
            assert_eq!(source, ClassifyError::Direction);
        }
        other => panic!("expected a direction error, got {:?}", other),
    }
}

#[test]
fn window_id_out_is_rejected() {
    let model = method_model("              - { name: parent, attributes: [out], data-type: { kind: window-id } }");
    let error = generate_default(&load(&model)).unwrap_err();
    assert!(matches!(error, GenError::Argument { source: ClassifyError::WindowIdOut, .. }));
    assert!(error.to_string().contains("argument parent of method Run of interface IThing"));
}

#[test]
fn array_enumeration_shape_is_checked() {
    let model = method_model(
        "              - { name: phases, attributes: [in], data-type: { kind: array-enumeration, template-types: [ { kind: integer } ] } }",
    );
    assert!(matches!(
        generate_default(&load(&model)),
        Err(GenError::Argument { source: ClassifyError::ArrayEnumerationElement(_), .. })
    ));

    let model = method_model(
        "              - { name: phases, attributes: [in], data-type: { kind: array-enumeration } }",
    );
    assert!(matches!(
        generate_default(&load(&model)),
        Err(GenError::Argument { source: ClassifyError::ArrayEnumerationArity(0), .. })
    ));
}

#[test]
fn foreign_references_are_reported() {
    let model = method_model(
        "              - { name: widget, attributes: [in], data-type: { kind: interface, name: \"Vendor::IWidget\" } }",
    );
    let libraries = load(&model);
    let mut resolver = HashMap::new();
    resolver.insert("Vendor::IWidget".to_string(), 0);
    let ir = build_ir(&libraries, &resolver, &NamingTables::new()).unwrap();
    assert!(ir.foreign_namespaces.contains("Vendor"));
    assert_eq!(ir.interfaces[0].methods[0].arguments[0].direction, Direction::In);

    let code = generate(&libraries, &resolver, &NamingTables::new(), &GeneratorOptions::default()).unwrap();
    assert!(code.contains("//Foreign namespaces, must be imported by the including module:\n//  Vendor\n"));
    assert!(code.contains("widget:&Vendor::Widget"));
}

#[test]
fn ir_serializes_to_json() {
    let libraries = load(THERMO_MODEL);
    let ir = build_ir(&libraries, &HashMap::<String, usize>::new(), &NamingTables::new()).unwrap();
    let json = serde_json::to_value(&ir).unwrap();
    assert_eq!(json["name"], "Thermo");
    assert_eq!(json["enumerations"][0]["kind"], "bit-flags");
    assert_eq!(json["interfaces"][0]["methods"][0]["raw_slot"], "getTemperature");
}

#[test]
fn no_libraries_is_an_error() {
    assert!(matches!(generate_default(&[]), Err(GenError::NoLibraries)));
}
