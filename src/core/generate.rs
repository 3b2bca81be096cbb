//! Filepath: src/core/generate.rs
//! Stub content generation for freshly scaffolded files.
//!
//! A registry maps filenames (e.g. `go.mod`) and extensions (e.g. `.go`) to
//! generator functions; everything else falls back to a comment header in the
//! file type's comment syntax, or empty content when no comment was given.

use std::process::Command;

use indexmap::IndexMap;

/// Produces the initial content for a file at `rel_path`, given its comment.
pub type GeneratorFn = fn(rel_path: &str, comment: &str) -> String;

#[derive(Debug, Clone, Copy)]
struct CommentSyntax {
    prefix: &'static str,
    suffix: &'static str,
}

pub struct ContentGenerator {
    generators: IndexMap<&'static str, GeneratorFn>,
    comment_syntax: IndexMap<&'static str, CommentSyntax>,
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentGenerator {
    pub fn new() -> Self {
        let mut generators: IndexMap<&'static str, GeneratorFn> = IndexMap::new();
        generators.insert(".go", generate_go);
        generators.insert("go.mod", generate_go_mod);
        generators.insert("go.work", generate_go_work);
        generators.insert("go.sum", generate_go_sum);

        let comment_syntax = IndexMap::from([
            (".py", CommentSyntax { prefix: "# ", suffix: "" }),
            (".js", CommentSyntax { prefix: "// ", suffix: "" }),
            (".ts", CommentSyntax { prefix: "// ", suffix: "" }),
            (".rs", CommentSyntax { prefix: "// ", suffix: "" }),
            (".java", CommentSyntax { prefix: "// ", suffix: "" }),
            (".c", CommentSyntax { prefix: "// ", suffix: "" }),
            (".cpp", CommentSyntax { prefix: "// ", suffix: "" }),
            (".h", CommentSyntax { prefix: "// ", suffix: "" }),
            (".sh", CommentSyntax { prefix: "# ", suffix: "" }),
            (".yaml", CommentSyntax { prefix: "# ", suffix: "" }),
            (".yml", CommentSyntax { prefix: "# ", suffix: "" }),
            (".toml", CommentSyntax { prefix: "# ", suffix: "" }),
            (".xml", CommentSyntax { prefix: "<!-- ", suffix: " -->" }),
            (".html", CommentSyntax { prefix: "<!-- ", suffix: " -->" }),
            (".md", CommentSyntax { prefix: "<!-- ", suffix: " -->" }),
            (".go", CommentSyntax { prefix: "// ", suffix: "" }),
            (".mod", CommentSyntax { prefix: "// ", suffix: "" }),
            (".work", CommentSyntax { prefix: "// ", suffix: "" }),
            (".sum", CommentSyntax { prefix: "// ", suffix: "" }),
        ]);

        Self { generators, comment_syntax }
    }

    /// Register a generator for an extension (`.go`) or exact filename
    /// (`go.mod`). Filename matches take precedence.
    pub fn register(&mut self, ext_or_name: &'static str, generator: GeneratorFn) {
        self.generators.insert(ext_or_name, generator);
    }

    /// Content for a file stub based on its relative path and comment.
    pub fn content_for(&self, rel_path: &str, comment: &str) -> String {
        let base = base_of(rel_path);

        if let Some(generator) = self.generators.get(base) {
            return generator(rel_path, comment);
        }
        if let Some(generator) = self.generators.get(extension_of(base)) {
            return generator(rel_path, comment);
        }
        self.comment_header(rel_path, comment)
    }

    /// Emit only the comment header in the right syntax; shell-style when the
    /// extension is unknown.
    fn comment_header(&self, rel_path: &str, comment: &str) -> String {
        if comment.is_empty() {
            return String::new();
        }
        let syn = self
            .comment_syntax
            .get(extension_of(base_of(rel_path)))
            .copied()
            .unwrap_or(CommentSyntax { prefix: "# ", suffix: "" });
        format!("{}{}{}\n", syn.prefix, comment, syn.suffix)
    }
}

/// Final path segment.
fn base_of(rel_path: &str) -> &str {
    match rel_path.rfind('/') {
        Some(i) => &rel_path[i + 1..],
        None => rel_path,
    }
}

/// Extension including the dot (`".go"`), `""` when absent. A leading dot in a
/// hidden filename is not an extension separator.
fn extension_of(base: &str) -> &str {
    match base.char_indices().rev().find(|&(i, c)| c == '.' && i > 0) {
        Some((i, _)) => &base[i..],
        None => "",
    }
}

/// Package stub for `.go` files.
fn generate_go(rel_path: &str, comment: &str) -> String {
    let name = base_of(rel_path);

    if name == "main.go" {
        return if comment.is_empty() {
            format!("package main\n\nfunc main() {{\n    // TODO: implement {name}\n}}\n")
        } else {
            format!(
                "// {comment}\n\npackage main\n\nfunc main() {{\n    // TODO: implement {name}\n}}\n"
            )
        };
    }

    let pkg = infer_package(rel_path);
    if comment.is_empty() {
        format!("package {pkg}\n\n// TODO: implement {name}\n")
    } else {
        format!("// {comment}\n\npackage {pkg}\n\n// TODO: implement {name}\n")
    }
}

/// `go.mod` stub with a best-effort module name and toolchain version.
fn generate_go_mod(rel_path: &str, comment: &str) -> String {
    let module = infer_module_name(rel_path);
    let version = toolchain_go_version();
    if comment.is_empty() {
        format!("module {module}\n\ngo {version}\n")
    } else {
        format!("// {comment}\n\nmodule {module}\n\ngo {version}\n")
    }
}

/// `go.work` stub for a multi-module workspace.
fn generate_go_work(_rel_path: &str, comment: &str) -> String {
    let version = toolchain_go_version();
    let body = format!("go {version}\n\nuse (\n    // Add your module directories here\n    // .\n)\n");
    if comment.is_empty() {
        body
    } else {
        format!("// {comment}\n\n{body}")
    }
}

/// Placeholder `go.sum`.
fn generate_go_sum(_rel_path: &str, comment: &str) -> String {
    let note = "// This file will be automatically populated when dependencies are added to go.mod\n";
    if comment.is_empty() {
        note.to_string()
    } else {
        format!("// {comment}\n{note}")
    }
}

/// Go package name for `rel_path`: `main` for `main.go`, files under `cmd/`,
/// and top-level files; otherwise the parent directory's name.
fn infer_package(rel_path: &str) -> &str {
    let name = base_of(rel_path);
    if name == "main.go" || rel_path.starts_with("cmd/") {
        return "main";
    }
    match rel_path.rfind('/') {
        None => "main",
        Some(i) => base_of(&rel_path[..i]),
    }
}

/// Module name for a `go.mod` at `rel_path`: the git remote for root modules
/// when one is configured, the current directory name otherwise, and a
/// placeholder domain for nested modules.
fn infer_module_name(rel_path: &str) -> String {
    let dir = match rel_path.rfind('/') {
        Some(i) => &rel_path[..i],
        None => "",
    };

    if !dir.is_empty() {
        return format!("example.com/{dir}");
    }

    if let Some(remote) = git_remote_url()
        && remote.contains("github.com")
    {
        let parts: Vec<&str> = remote.split('/').collect();
        if parts.len() >= 2 {
            let repo = parts[parts.len() - 1].trim_end_matches(".git");
            let mut user = parts[parts.len() - 2];
            if let Some((_, after)) = user.split_once(':') {
                user = after;
            }
            return format!("github.com/{user}/{repo}");
        }
    }

    std::env::current_dir()
        .ok()
        .and_then(|cwd| cwd.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "example.com/mymodule".to_string())
}

fn git_remote_url() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// `major.minor` of the installed Go toolchain, `1.24` when unavailable.
fn toolchain_go_version() -> String {
    let fallback = "1.24".to_string();
    let Ok(output) = Command::new("go").args(["version"]).output() else {
        return fallback;
    };
    let text = String::from_utf8_lossy(&output.stdout);
    // "go version go1.24.2 darwin/arm64"
    let Some(full) = text.split_whitespace().nth(2).map(|v| v.trim_start_matches("go")) else {
        return fallback;
    };
    match full.rfind('.') {
        Some(i) if i > 0 && full[..i].contains('.') => full[..i].to_string(),
        _ if !full.is_empty() => full.to_string(),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_file_gets_parent_package() {
        let generator = ContentGenerator::new();
        let content = generator.content_for("internal/api/client.go", "API client");
        assert!(content.starts_with("// API client\n"));
        assert!(content.contains("package api"));
        assert!(content.contains("TODO: implement client.go"));
    }

    #[test]
    fn main_go_is_always_package_main() {
        let generator = ContentGenerator::new();
        for path in ["main.go", "cmd/app/main.go", "server/main.go"] {
            let content = generator.content_for(path, "");
            assert!(content.contains("package main"), "{path}: {content}");
            assert!(content.contains("func main()"), "{path}: {content}");
        }
    }

    #[test]
    fn top_level_and_cmd_files_are_package_main() {
        assert_eq!(infer_package("orchestrator.go"), "main");
        assert_eq!(infer_package("cmd/tool/run.go"), "main");
        assert_eq!(infer_package("pkg/util/helper.go"), "util");
    }

    #[test]
    fn go_mod_declares_a_module() {
        let generator = ContentGenerator::new();
        let content = generator.content_for("go.mod", "deps");
        assert!(content.starts_with("// deps\n"));
        assert!(content.contains("module "));
        assert!(content.contains("\ngo "));
    }

    #[test]
    fn nested_go_mod_uses_directory_module() {
        assert_eq!(infer_module_name("plugins/auth/go.mod"), "example.com/plugins/auth");
    }

    #[test]
    fn comment_header_matches_extension() {
        let generator = ContentGenerator::new();
        assert_eq!(generator.content_for("run.py", "entry"), "# entry\n");
        assert_eq!(generator.content_for("app.ts", "ui"), "// ui\n");
        assert_eq!(
            generator.content_for("README.md", "docs"),
            "<!-- docs -->\n"
        );
        // Unknown extension falls back to shell-style
        assert_eq!(generator.content_for("Dockerfile", "image"), "# image\n");
    }

    #[test]
    fn no_comment_means_empty_stub() {
        let generator = ContentGenerator::new();
        assert_eq!(generator.content_for("README.md", ""), "");
        assert_eq!(generator.content_for("Makefile", ""), "");
    }

    #[test]
    fn registered_generator_overrides_default() {
        fn banner(_rel: &str, _comment: &str) -> String {
            "custom\n".to_string()
        }
        let mut generator = ContentGenerator::new();
        generator.register(".md", banner);
        assert_eq!(generator.content_for("README.md", "ignored"), "custom\n");
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(extension_of("main.go"), ".go");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".gitignore"), "");
    }
}
