//! Diagnostic codes and helpers for RTL emission warnings.
//!
//! Warning codes `W401`--`W407` cover instances and nets left out of the
//! generated module.

use tessel_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Instance record is malformed and is not instantiated.
pub const W401: DiagnosticCode = DiagnosticCode::new(Category::Warning, 401);

/// Parameter overrides are malformed and are left out.
pub const W402: DiagnosticCode = DiagnosticCode::new(Category::Warning, 402);

/// Net is malformed or has no endpoints.
pub const W403: DiagnosticCode = DiagnosticCode::new(Category::Warning, 403);

/// First endpoint of a net is malformed.
pub const W404: DiagnosticCode = DiagnosticCode::new(Category::Warning, 404);

/// First endpoint of a net names an unknown instance.
pub const W405: DiagnosticCode = DiagnosticCode::new(Category::Warning, 405);

/// Module of the first endpoint's instance is not in the module library.
pub const W406: DiagnosticCode = DiagnosticCode::new(Category::Warning, 406);

/// First endpoint's port is not declared by its module.
pub const W407: DiagnosticCode = DiagnosticCode::new(Category::Warning, 407);

fn skipped_wire(code: DiagnosticCode, net: &str, message: String) -> Diagnostic {
    Diagnostic::warning(code, message)
        .with_subject(format!("net.{net}"))
        .with_note(format!("no wire is declared for `{net}`"))
}

/// Creates a warning for a malformed instance record.
pub fn warn_malformed_instance(instance: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning(W401, format!("instance `{instance}` skipped: {reason}"))
        .with_subject(format!("instance.{instance}"))
}

/// Creates a warning for malformed parameter overrides.
pub fn warn_malformed_parameters(instance: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning(
        W402,
        format!("parameter overrides of `{instance}` ignored: {reason}"),
    )
    .with_subject(format!("instance.{instance}.parameter"))
}

/// Creates a warning for a malformed or empty net.
pub fn warn_invalid_net(net: &str, reason: &str) -> Diagnostic {
    skipped_wire(W403, net, format!("invalid net `{net}`: {reason}"))
}

/// Creates a warning for a malformed first endpoint.
pub fn warn_malformed_endpoint(net: &str, reason: &str) -> Diagnostic {
    skipped_wire(
        W404,
        net,
        format!("first endpoint of net `{net}` is invalid: {reason}"),
    )
}

/// Creates a warning for an endpoint naming an unknown instance.
pub fn warn_unknown_instance(net: &str, instance: &str) -> Diagnostic {
    skipped_wire(
        W405,
        net,
        format!("net `{net}` connects unknown instance `{instance}`"),
    )
}

/// Creates a warning for an instance whose module is not in the library.
pub fn warn_unknown_module(net: &str, instance: &str, module: &str) -> Diagnostic {
    skipped_wire(
        W406,
        net,
        format!("module `{module}` of instance `{instance}` not found in module library"),
    )
}

/// Creates a warning for a port missing from its module.
pub fn warn_unknown_port(net: &str, port: &str, module: &str) -> Diagnostic {
    skipped_wire(
        W407,
        net,
        format!("port `{port}` not found in module `{module}`"),
    )
}
