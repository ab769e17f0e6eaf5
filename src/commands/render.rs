//! Implementation of the `nsprep render` command.

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::context::{ProjectContext, same_file};
use crate::error::{PrepError, Result};
use crate::git;
use crate::namespace::NamespaceBinding;
use crate::render::{header_line, render, render_document};

/// Execute the `nsprep render` command.
///
/// Resolves the branch fresh, selects its binding, and renders the template.
/// Prints a one-line summary on success.
pub fn cmd_render(ctx: &ProjectContext, mut config: Config, args: RenderArgs) -> Result<()> {
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    config.validate()?;

    let branch = git::resolve_branch(&ctx.cwd);
    let table = config.namespace_table();
    let binding = table.map_branch(&branch);

    let template_path = ctx.template_path(&config);
    let output_path = ctx.output_path(&config);
    if same_file(&template_path, &output_path) {
        return Err(PrepError::ConfigError(format!(
            "config validation failed: template '{}' and output '{}' are the same file",
            config.template, config.output
        )));
    }
    let header = header_line(config.comment_style(), &config.template, &config.build_command);

    if args.stdout {
        print!("{}", render_document(&template_path, binding, &header)?);
        return Ok(());
    }

    render(&template_path, &output_path, binding, &header)?;

    let file_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.output.clone());
    println!("{}", summary_line(&file_name, &branch, binding));
    Ok(())
}

fn summary_line(file_name: &str, branch: &str, binding: &NamespaceBinding) -> String {
    format!(
        "Updating {} for branch: \"{}\" bindings: {}",
        file_name, branch, binding
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_repo, detach_head, git, write_file};
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = "war/WEB-INF/appengine-web-template.xml";
    const OUTPUT: &str = "war/WEB-INF/appengine-web.xml";

    fn run(ctx: &ProjectContext) -> Result<()> {
        cmd_render(ctx, Config::default(), RenderArgs::default())
    }

    fn rendered(root: &std::path::Path) -> String {
        fs::read_to_string(root.join(OUTPUT)).unwrap()
    }

    #[test]
    fn prod_branch_renders_prod_binding() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), TEMPLATE, "<application>app-{suffix}</application>\nhost: app-{namespace}.example.com\n");
        let ctx = ProjectContext::resolve_from(repo.path());

        run(&ctx).unwrap();

        let out = rendered(repo.path());
        assert_eq!(
            out,
            "<!-- Autogenerated file do not edit. Edit war/WEB-INF/appengine-web-template.xml and run \"make all\". -->\n\
             <application>app-prod</application>\n\
             host: app-.example.com\n"
        );
    }

    #[test]
    fn staging_branch_renders_staging_namespace() {
        let repo = create_test_repo("main");
        git(repo.path(), &["checkout", "-b", "staging"]);
        write_file(repo.path(), TEMPLATE, "ns:{namespace}\n");

        run(&ProjectContext::resolve_from(repo.path())).unwrap();

        assert!(rendered(repo.path()).ends_with("ns:staging\n"));
    }

    #[test]
    fn unlisted_branch_renders_default() {
        let repo = create_test_repo("feature-x");
        write_file(repo.path(), TEMPLATE, "ns:{namespace}\n");

        run(&ProjectContext::resolve_from(repo.path())).unwrap();

        assert!(rendered(repo.path()).ends_with("ns:dev\n"));
    }

    #[test]
    fn detached_head_renders_default() {
        let repo = create_test_repo("prod");
        detach_head(repo.path());
        write_file(repo.path(), TEMPLATE, "ns:{namespace}\n");

        run(&ProjectContext::resolve_from(repo.path())).unwrap();

        assert!(rendered(repo.path()).ends_with("ns:dev\n"));
    }

    #[test]
    fn outside_repository_renders_default() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), TEMPLATE, "ns:{namespace}\n");

        run(&ProjectContext::resolve_from(dir.path())).unwrap();

        assert!(rendered(dir.path()).ends_with("ns:dev\n"));
    }

    #[test]
    fn runs_from_subdirectory_against_project_root() {
        let repo = create_test_repo("staging");
        write_file(repo.path(), TEMPLATE, "ns:{namespace}\n");
        let subdir = repo.path().join("war");

        run(&ProjectContext::resolve_from(&subdir)).unwrap();

        assert!(rendered(repo.path()).ends_with("ns:staging\n"));
    }

    #[test]
    fn rerun_overwrites_with_identical_bytes() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), TEMPLATE, "a={suffix}\n");
        let ctx = ProjectContext::resolve_from(repo.path());

        run(&ctx).unwrap();
        let first = fs::read(repo.path().join(OUTPUT)).unwrap();
        fs::write(repo.path().join(OUTPUT), "hand edit").unwrap();
        run(&ctx).unwrap();
        let second = fs::read(repo.path().join(OUTPUT)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_field_fails_and_writes_nothing() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), TEMPLATE, "ns:{missing_field}\n");

        let err = run(&ProjectContext::resolve_from(repo.path())).unwrap_err();

        assert!(matches!(err, PrepError::MissingField { .. }));
        assert!(!repo.path().join(OUTPUT).exists());
    }

    #[test]
    fn missing_template_fails() {
        let repo = create_test_repo("prod");
        let err = run(&ProjectContext::resolve_from(repo.path())).unwrap_err();
        assert!(matches!(err, PrepError::TemplateNotFound { .. }));
    }

    #[test]
    fn path_overrides_and_hash_header() {
        let repo = create_test_repo("staging");
        write_file(repo.path(), "deploy/app-template.yaml", "namespace: {namespace}\n");
        let args = RenderArgs {
            template: Some("deploy/app-template.yaml".to_string()),
            output: Some("deploy/app.yaml".to_string()),
            stdout: false,
        };

        cmd_render(&ProjectContext::resolve_from(repo.path()), Config::default(), args).unwrap();

        let out = fs::read_to_string(repo.path().join("deploy/app.yaml")).unwrap();
        assert_eq!(
            out,
            "# Autogenerated file do not edit. Edit deploy/app-template.yaml and run \"make all\".\n\
             namespace: staging\n"
        );
    }

    #[test]
    fn stdout_mode_writes_no_file() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), TEMPLATE, "{suffix}\n");
        let args = RenderArgs {
            stdout: true,
            ..RenderArgs::default()
        };

        cmd_render(&ProjectContext::resolve_from(repo.path()), Config::default(), args).unwrap();

        assert!(!repo.path().join(OUTPUT).exists());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let repo = create_test_repo("prod");
        let args = RenderArgs {
            output: Some(TEMPLATE.to_string()),
            ..RenderArgs::default()
        };

        let err = cmd_render(&ProjectContext::resolve_from(repo.path()), Config::default(), args)
            .unwrap_err();

        assert!(matches!(err, PrepError::ConfigError(_)));
    }

    #[test]
    fn aliased_output_path_cannot_overwrite_template() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), "a.xml", "x={suffix}\n");
        let args = RenderArgs {
            template: Some("a.xml".to_string()),
            output: Some("./a.xml".to_string()),
            stdout: false,
        };

        let err = cmd_render(&ProjectContext::resolve_from(repo.path()), Config::default(), args)
            .unwrap_err();

        assert!(matches!(err, PrepError::ConfigError(_)));
        assert!(err.to_string().contains("same file"));
        assert_eq!(
            fs::read_to_string(repo.path().join("a.xml")).unwrap(),
            "x={suffix}\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_symlinked_to_template_is_rejected() {
        let repo = create_test_repo("prod");
        write_file(repo.path(), "a.xml", "x={suffix}\n");
        std::os::unix::fs::symlink(repo.path().join("a.xml"), repo.path().join("out.xml")).unwrap();
        let args = RenderArgs {
            template: Some("a.xml".to_string()),
            output: Some("out.xml".to_string()),
            stdout: false,
        };

        let err = cmd_render(&ProjectContext::resolve_from(repo.path()), Config::default(), args)
            .unwrap_err();

        assert!(matches!(err, PrepError::ConfigError(_)));
        assert_eq!(
            fs::read_to_string(repo.path().join("a.xml")).unwrap(),
            "x={suffix}\n"
        );
    }

    #[test]
    fn summary_names_branch_and_binding() {
        let binding = NamespaceBinding::from_pairs([("suffix", "prod"), ("namespace", "")]);
        assert_eq!(
            summary_line("appengine-web.xml", "prod", &binding),
            r#"Updating appengine-web.xml for branch: "prod" bindings: {namespace: "", suffix: "prod"}"#
        );
        assert!(summary_line("out.xml", "", &binding).contains("branch: \"\""));
    }
}
