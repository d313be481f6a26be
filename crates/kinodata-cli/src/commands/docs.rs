use crate::cli::DocsTreeArgs;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parent module path -> list of {module path: stub file} entries.
pub type DocsTree = BTreeMap<String, Vec<BTreeMap<String, String>>>;

pub fn run(args: DocsTreeArgs) -> Result<()> {
    let tree = generate(&args.source, &args.output, &args.package)?;
    print!("{}", serde_yaml::to_string(&tree)?);
    Ok(())
}

/// Walks the source tree, writes one Markdown stub per Rust module under
/// `output` (mirroring the directory hierarchy), and returns the table of
/// contents. The output directory must not exist yet.
fn generate(source: &Path, output: &Path, package: &str) -> Result<DocsTree> {
    let mut modules = Vec::new();
    collect_modules(source, &mut Vec::new(), &mut modules)?;

    fs::create_dir(output)?;

    let mut tree = DocsTree::new();
    for (dirs, stem) in modules {
        let mut parts = vec![package.to_string()];
        parts.extend(dirs.iter().cloned());
        // mod.rs / lib.rs / main.rs document their containing module.
        if !matches!(stem.as_str(), "mod" | "lib" | "main") {
            parts.push(stem.clone());
        }
        let module = parts.join("::");
        let parent = if parts.len() > 1 {
            parts[..parts.len() - 1].join("::")
        } else {
            package.to_string()
        };

        let mut stub_dir = output.to_path_buf();
        for dir in &dirs {
            stub_dir.push(dir);
        }
        fs::create_dir_all(&stub_dir)?;
        let stub_path = stub_dir.join(format!("{stem}.md"));
        fs::write(&stub_path, format!("# `{module}`\n"))?;
        debug!(module, stub = %stub_path.display(), "Wrote docs stub");

        tree.entry(parent).or_default().push(BTreeMap::from([(
            module,
            stub_path.to_string_lossy().to_string(),
        )]));
    }

    Ok(tree)
}

/// Collects `(directory components, file stem)` for every `.rs` file under
/// `dir`, depth-first, in name order for deterministic output.
fn collect_modules(
    dir: &Path,
    dirs: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, String)>,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if path.is_dir() {
            dirs.push(name);
            collect_modules(&path, dirs, out)?;
            dirs.pop();
        } else if let Some(stem) = name.strip_suffix(".rs") {
            out.push((dirs.clone(), stem.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_source_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("core")).unwrap();
        fs::write(src.join("lib.rs"), "pub mod core;\n").unwrap();
        fs::write(src.join("core/mod.rs"), "pub mod protein;\n").unwrap();
        fs::write(src.join("core/protein.rs"), "pub struct P;\n").unwrap();
        fs::write(src.join("core/notes.txt"), "not a module\n").unwrap();
        dir
    }

    #[test]
    fn generate_writes_stubs_mirroring_the_module_hierarchy() {
        let dir = sample_source_tree();
        let output = dir.path().join("apidocs");

        let tree = generate(&dir.path().join("src"), &output, "kinodata").unwrap();

        let stub = output.join("core/protein.md");
        assert_eq!(
            fs::read_to_string(&stub).unwrap(),
            "# `kinodata::core::protein`\n"
        );
        assert!(output.join("core/mod.md").exists());
        assert!(output.join("lib.md").exists());
        assert!(!output.join("core/notes.md").exists());

        let core_children = &tree["kinodata::core"];
        assert!(
            core_children
                .iter()
                .any(|entry| entry.contains_key("kinodata::core::protein"))
        );
        assert!(
            tree["kinodata"]
                .iter()
                .any(|entry| entry.contains_key("kinodata::core"))
        );
    }

    #[test]
    fn generate_fails_when_output_directory_exists() {
        let dir = sample_source_tree();
        let output = dir.path().join("apidocs");
        fs::create_dir(&output).unwrap();

        let err = generate(&dir.path().join("src"), &output, "kinodata").unwrap_err();
        assert!(matches!(err, crate::error::CliError::Io(_)));
    }

    #[test]
    fn yaml_toc_is_serializable_and_grouped_by_parent() {
        let dir = sample_source_tree();
        let output = dir.path().join("apidocs");

        let tree = generate(&dir.path().join("src"), &output, "kinodata").unwrap();
        let yaml = serde_yaml::to_string(&tree).unwrap();

        assert!(yaml.contains("kinodata::core"));
        assert!(yaml.contains("kinodata::core::protein"));
    }
}
