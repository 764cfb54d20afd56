use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }

    std::fs::write(&file_spec.path, file_spec.content).expect("Failed to write file");
}

/// A MediaWiki-shaped page with the given article body.
pub fn wiki_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title} - Wikipedia</title></head>
<body>
<h1 id="firstHeading" class="firstHeading">{title}</h1>
<div id="bodyContent"><div id="mw-content-text" class="mw-body-content">
<div class="mw-content-ltr mw-parser-output" lang="en" dir="ltr">
{content}
<h2>References</h2>
<ol class="references"><li>A citation.</li></ol>
</div></div></div>
</body></html>"#
    )
}

/// Writes `pages/<file>.html` for each page and returns the matching list line.
pub fn write_page(dir: &Path, file: &str, title: &str, content: &str, date: &str) -> String {
    let path = dir.join("pages").join(format!("{file}.html"));
    write_file(FileSpec::new(path.clone(), wiki_page(title, content)));

    format!("{title} | {} | {date}", path.display())
}

pub fn write_list(dir: &Path, name: &str, lines: &[String]) {
    let mut content = String::from("# title | url | requested date\n");
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    write_file(FileSpec::new(dir.join(name), content));
}
