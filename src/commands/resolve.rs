//! Implementation of the `nsprep resolve` command.
//!
//! Reports which branch was detected and which binding it selects, without
//! writing anything. A detached HEAD maps to the default binding exactly like
//! an unlisted branch, but is reported as unresolved here.

use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{PrepError, Result};
use crate::git;
use crate::namespace::NamespaceBinding;
use crate::template::referenced_fields;
use serde::Serialize;

/// What a render would use, as reported by `nsprep resolve`.
#[derive(Debug, Serialize)]
struct Resolution {
    branch: String,
    branch_resolved: bool,
    in_repository: bool,
    listed: bool,
    binding: NamespaceBinding,
    known_branches: Vec<String>,
    template: String,
    output: String,
    /// Fields referenced by the template; `None` if it cannot be read.
    template_fields: Option<Vec<String>>,
    missing_fields: Vec<String>,
}

/// Execute the `nsprep resolve` command.
pub fn cmd_resolve(ctx: &ProjectContext, config: &Config, args: ResolveArgs) -> Result<()> {
    let resolution = resolve(ctx, config);

    if args.json {
        let json = serde_json::to_string_pretty(&resolution).map_err(|e| {
            PrepError::UserError(format!("failed to serialize resolution to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        print_resolution(&resolution);
    }

    Ok(())
}

fn resolve(ctx: &ProjectContext, config: &Config) -> Resolution {
    let branch = git::resolve_branch(&ctx.cwd);
    let table = config.namespace_table();
    let binding = table.map_branch(&branch).clone();

    let template_fields = std::fs::read_to_string(ctx.template_path(config))
        .ok()
        .map(|content| referenced_fields(&content));
    let missing_fields = template_fields
        .iter()
        .flatten()
        .filter(|field| binding.get(field).is_none())
        .cloned()
        .collect();

    Resolution {
        branch_resolved: !branch.is_empty(),
        in_repository: ctx.in_repository,
        listed: table.is_listed(&branch),
        known_branches: table.branches().map(str::to_string).collect(),
        branch,
        binding,
        template: config.template.clone(),
        output: config.output.clone(),
        template_fields,
        missing_fields,
    }
}

fn print_resolution(r: &Resolution) {
    let branch = if r.branch_resolved {
        r.branch.as_str()
    } else if r.in_repository {
        "(none: detached HEAD)"
    } else {
        "(none: not a git repository)"
    };
    let source = if r.listed { "listed" } else { "default" };

    println!("Branch:    {}", branch);
    println!("Binding:   {} ({})", r.binding, source);
    println!("Known:     {}", r.known_branches.join(", "));
    println!("Template:  {}", r.template);
    println!("Output:    {}", r.output);

    match &r.template_fields {
        Some(fields) if fields.is_empty() => println!("Fields:    (none)"),
        Some(fields) => println!("Fields:    {}", fields.join(", ")),
        None => println!("Fields:    (template not readable)"),
    }

    if !r.missing_fields.is_empty() {
        println!();
        println!(
            "Warning: render will fail, binding does not define: {}",
            r.missing_fields.join(", ")
        );
    }
}
