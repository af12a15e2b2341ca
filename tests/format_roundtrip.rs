use srgmap::{
    FieldSymbol, JavaType, MappingError, MappingsFormat, MethodSignature, MethodSymbol,
};

const SRG_DOCUMENT: &str = "\
# deobfuscation table, hand maintained
PK: ./ net/techcable

CL: aa net/techcable/minecraft/NoHax
CL: ab net/techcable/minecraft/XRay
FD: aa/a net/techcable/minecraft/NoHax/enabled
MD: aa/b (Lab;I)Lab; net/techcable/minecraft/NoHax/isHacking (Lnet/techcable/minecraft/XRay;I)Lnet/techcable/minecraft/XRay;
";

const CSRG_DOCUMENT: &str = "\
obf4 a dead
obfs a (Lobf4;ID)Z isHacking
obf4 net/techcable/minecraft/Player
";

fn method(internal: &str, descriptor: &str) -> MethodSymbol {
    let signature = MethodSignature::from_descriptor(descriptor).unwrap();
    MethodSymbol::from_internal_name(internal, signature).unwrap()
}

fn field(internal: &str) -> FieldSymbol {
    FieldSymbol::from_internal_name(internal).unwrap()
}

#[test]
fn srg_documents_resolve_classes_and_members() {
    let mappings = MappingsFormat::Srg.parse_str(SRG_DOCUMENT).unwrap();

    let no_hax = JavaType::from_internal_name("aa").unwrap();
    assert_eq!(
        mappings.get_new_class(&no_hax).unwrap().internal_name(),
        "net/techcable/minecraft/NoHax"
    );
    assert_eq!(
        mappings.get_new_field(&field("aa/a")).unwrap().internal_name(),
        "net/techcable/minecraft/NoHax/enabled"
    );

    let renamed = mappings.get_new_method(&method("aa/b", "(Lab;I)Lab;")).unwrap();
    assert_eq!(renamed.internal_name(), "net/techcable/minecraft/NoHax/isHacking");
    assert_eq!(
        renamed.signature().descriptor(),
        "(Lnet/techcable/minecraft/XRay;I)Lnet/techcable/minecraft/XRay;"
    );
}

#[test]
fn srg_round_trip_preserves_content_but_not_package_records() {
    let mappings = MappingsFormat::Srg.parse_str(SRG_DOCUMENT).unwrap();
    let lines = MappingsFormat::Srg.to_lines(&mappings);
    assert!(lines.iter().all(|line| line.starts_with("CL: ")
        || line.starts_with("FD: ")
        || line.starts_with("MD: ")));

    let reparsed = MappingsFormat::Srg.parse_str(&lines.join("\n")).unwrap();
    assert_eq!(reparsed.snapshot().unwrap(), mappings.snapshot().unwrap());
}

#[test]
fn tagged_method_lookup_returns_the_recorded_pair() {
    let mappings = MappingsFormat::Srg
        .parse_str(
            "CL: obfs net/techcable/minecraft/NoHax\n\
             CL: obf4 net/techcable/minecraft/Player\n\
             MD: obfs/a (Lobf4;ID)Z net/techcable/minecraft/NoHax/isHacking (Lnet/techcable/minecraft/Player;ID)Z\n",
        )
        .unwrap();

    let renamed = mappings.get_new_method(&method("obfs/a", "(Lobf4;ID)Z")).unwrap();
    assert_eq!(renamed.owner().name(), "net.techcable.minecraft.NoHax");
    assert_eq!(renamed.name(), "isHacking");
    assert_eq!(
        renamed.signature().descriptor(),
        "(Lnet/techcable/minecraft/Player;ID)Z"
    );
}

#[test]
fn csrg_member_records_resolve_through_a_later_class_record() {
    let mappings = MappingsFormat::CompactSrg.parse_str(CSRG_DOCUMENT).unwrap();

    let renamed_field = mappings.get_new_field(&field("obf4/a")).unwrap();
    assert_eq!(
        renamed_field.internal_name(),
        "net/techcable/minecraft/Player/dead"
    );

    let renamed_method = mappings.get_new_method(&method("obfs/a", "(Lobf4;ID)Z")).unwrap();
    assert_eq!(renamed_method.name(), "isHacking");
    assert_eq!(renamed_method.owner().internal_name(), "obfs");
    assert_eq!(
        renamed_method.signature().descriptor(),
        "(Lnet/techcable/minecraft/Player;ID)Z"
    );
}

#[test]
fn csrg_round_trip_reorders_classes_first() {
    let mappings = MappingsFormat::CompactSrg.parse_str(CSRG_DOCUMENT).unwrap();
    let lines = MappingsFormat::CompactSrg.to_lines(&mappings);
    assert_eq!(lines[0], "obf4 net/techcable/minecraft/Player");

    let reparsed = MappingsFormat::CompactSrg.parse_str(&lines.join("\n")).unwrap();
    assert_eq!(reparsed.snapshot().unwrap(), mappings.snapshot().unwrap());
}

#[test]
fn formats_do_not_understand_each_other() {
    assert!(matches!(
        MappingsFormat::CompactSrg.parse_str(SRG_DOCUMENT),
        Err(MappingError::MalformedDescriptor { .. } | MappingError::MalformedIdentifier { .. })
    ));
    assert!(matches!(
        MappingsFormat::Srg.parse_str(CSRG_DOCUMENT),
        Err(MappingError::MalformedLine { .. })
    ));
}

#[test]
fn files_round_trip_through_disk() {
    let mappings = MappingsFormat::Srg.parse_str(SRG_DOCUMENT).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deobf.srg");

    MappingsFormat::Srg.write_file(&mappings, &path).unwrap();
    let reparsed = MappingsFormat::Srg.parse_file(&path).unwrap();
    assert_eq!(reparsed.snapshot().unwrap(), mappings.snapshot().unwrap());
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = MappingsFormat::Srg.parse_file(dir.path().join("absent.srg"));
    assert!(matches!(result, Err(MappingError::Io(_))));
}
