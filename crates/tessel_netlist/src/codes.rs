//! Diagnostic codes and helpers for bus expansion warnings.
//!
//! Warning codes `W301`--`W308` cover bus group members and nets that are
//! dropped during expansion. None of them stop the run.

use tessel_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Bus group member names an instance missing from `instance`.
pub const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);

/// Instance refers to a module missing from the module library.
pub const W302: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);

/// Member port resolves to no bus-tagged port of the module.
pub const W303: DiagnosticCode = DiagnosticCode::new(Category::Warning, 303);

/// Port is tagged with a bus type missing from the bus library.
pub const W304: DiagnosticCode = DiagnosticCode::new(Category::Warning, 304);

/// Member bus type differs from the type fixed by the group's first member.
pub const W305: DiagnosticCode = DiagnosticCode::new(Category::Warning, 305);

/// Bus group or bus group member has the wrong shape.
pub const W306: DiagnosticCode = DiagnosticCode::new(Category::Warning, 306);

/// Bus group has no valid connection and produces no nets.
pub const W307: DiagnosticCode = DiagnosticCode::new(Category::Warning, 307);

/// A malformed pre-existing net was replaced by an expanded net of the same name.
pub const W308: DiagnosticCode = DiagnosticCode::new(Category::Warning, 308);

fn member_subject(group: &str, instance: &str) -> String {
    format!("bus.{group}.{instance}")
}

/// Creates a warning for a member naming an unknown or malformed instance.
pub fn warn_unknown_instance(group: &str, instance: &str, malformed: Option<&str>) -> Diagnostic {
    let diag = Diagnostic::warning(
        W301,
        format!("bus group `{group}` refers to unknown instance `{instance}`"),
    )
    .with_subject(member_subject(group, instance));
    match malformed {
        Some(reason) => diag.with_note(format!("the instance record is malformed: {reason}")),
        None => diag.with_help("add the instance to the `instance` section"),
    }
}

/// Creates a warning for an instance whose module is not in the library.
pub fn warn_unknown_module(group: &str, instance: &str, module: &str) -> Diagnostic {
    Diagnostic::warning(
        W302,
        format!("module `{module}` of instance `{instance}` not found in module library"),
    )
    .with_subject(member_subject(group, instance))
}

/// Creates a warning for a member port that matches no bus-tagged port.
pub fn warn_unresolved_port(
    group: &str,
    instance: &str,
    module: &str,
    port: &str,
    tried: &[String],
) -> Diagnostic {
    let tried = tried
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ");
    Diagnostic::warning(
        W303,
        format!("port `{port}` of instance `{instance}` is not a bus port of module `{module}`"),
    )
    .with_subject(member_subject(group, instance))
    .with_note(format!("tried {tried}"))
}

/// Creates a warning for a bus type missing from the bus library.
pub fn warn_unknown_bus_type(group: &str, instance: &str, bus_type: &str) -> Diagnostic {
    Diagnostic::warning(
        W304,
        format!("bus type `{bus_type}` not found in bus library"),
    )
    .with_subject(member_subject(group, instance))
}

/// Creates a warning for a member whose bus type disagrees with the group.
pub fn warn_inconsistent_bus_type(
    group: &str,
    instance: &str,
    found: &str,
    expected: &str,
) -> Diagnostic {
    Diagnostic::warning(
        W305,
        format!("instance `{instance}` connects bus type `{found}` to group of type `{expected}`"),
    )
    .with_subject(member_subject(group, instance))
    .with_note("the first valid member of a group fixes its bus type")
}

/// Creates a warning for a malformed bus group or member.
pub fn warn_malformed_group(group: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning(W306, format!("malformed bus group `{group}`: {reason}"))
        .with_subject(format!("bus.{group}"))
}

/// Creates a warning for a group left without valid connections.
pub fn warn_empty_group(group: &str) -> Diagnostic {
    Diagnostic::warning(
        W307,
        format!("bus group `{group}` has no valid connections and is skipped"),
    )
    .with_subject(format!("bus.{group}"))
}

/// Creates a warning for a malformed net overwritten by expansion.
pub fn warn_replaced_net(net: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning(
        W308,
        format!("malformed net `{net}` replaced by expanded bus signal"),
    )
    .with_subject(format!("net.{net}"))
    .with_note(reason.to_string())
}
