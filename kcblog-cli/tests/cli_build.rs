use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::tempdir;

const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

fn kcblog(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("kcblog")?;
    cmd.current_dir(dir);
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    for var in ["kcSiteName", "kcSiteDescription", "kcBlogCssUrl"] {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

fn write(root: &Path, rel: &str, contents: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Serve a single stylesheet response on a local port
fn serve_stylesheet(body: &'static str) -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    Ok(format!("http://{}/simple.min.css", addr))
}

/// Every file under `root` as (relative path, bytes), sorted
fn snapshot(root: &Path) -> std::io::Result<Vec<(PathBuf, Vec<u8>)>> {
    fn visit(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                visit(root, &path, out)?;
            } else {
                let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                out.push((rel, fs::read(&path)?));
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    visit(root, root, &mut out)?;
    out.sort();
    Ok(out)
}

fn sample_site(root: &Path) -> std::io::Result<()> {
    write(root, "input/index.md", "# Home\n\n## Intro\n\nWelcome.\n")?;
    write(root, "input/posts/a.md", "# Post A\n\n## Details\n")?;
    write(root, "input/posts/_draft.md", "# Draft\n")?;
    write(root, "input/_private/x.md", "# Private\n")?;
    write(root, "input/posts/2024/deep.md", "# Deep\n")
}

#[test]
fn build_mirrors_tree_and_fetches_stylesheet() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_site(dir.path())?;
    let url = serve_stylesheet("body{margin:0}")?;

    kcblog(dir.path())?
        .args(["build", "--stylesheet-url", &url])
        .assert()
        .success();

    let out = dir.path().join("output");
    assert!(out.join("index.html").is_file());
    assert!(out.join("posts/a.html").is_file());
    assert!(out.join("posts/2024/deep.html").is_file());
    assert!(!out.join("posts/_draft.html").exists());
    assert!(!out.join("_private").exists());
    assert_eq!(fs::read_to_string(out.join("static/main.css"))?, "body{margin:0}");

    let home = fs::read_to_string(out.join("index.html"))?;
    assert!(home.contains("href=\"static/main.css\""));
    assert!(home.contains("<a href=\"posts/index.html\">posts</a>"));
    assert!(!home.contains("_private"));
    assert!(!home.contains("class=\"toc\""));
    assert!(!home.contains("class=\"breadcrumbs\""));

    let deep = fs::read_to_string(out.join("posts/2024/deep.html"))?;
    assert!(deep.contains("href=\"../../static/main.css\""));
    assert!(deep.contains(
        "<a href=\"../../index.html\">Home</a>\n / <a href=\"../index.html\">posts</a> / <a href=\"index.html\">2024</a>"
    ));
    assert!(deep.contains("<title>Deep | kcBlog</title>"));

    let post = fs::read_to_string(out.join("posts/a.html"))?;
    assert!(post.contains("<a href=\"#details\">Details</a>"));
    assert!(post.contains("<a href=\"2024/index.html\">2024</a>"));

    Ok(())
}

#[test]
fn rebuild_is_byte_identical_and_removes_stale_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_site(dir.path())?;
    write(dir.path(), "output/stale.html", "left over")?;

    kcblog(dir.path())?
        .args(["build", "--skip-assets"])
        .assert()
        .success();
    let first = snapshot(&dir.path().join("output"))?;
    assert!(!dir.path().join("output/stale.html").exists());

    kcblog(dir.path())?
        .args(["build", "--skip-assets"])
        .assert()
        .success();
    let second = snapshot(&dir.path().join("output"))?;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn failed_download_does_not_fail_build_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_site(dir.path())?;

    kcblog(dir.path())?
        .args(["build", "--stylesheet-url", "http://127.0.0.1:1/main.css"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to download stylesheet"));

    assert!(dir.path().join("output/index.html").is_file());
    assert!(dir.path().join("output/static").is_dir());
    assert!(!dir.path().join("output/static/main.css").exists());
    Ok(())
}

#[test]
fn failed_download_can_fail_build() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    sample_site(dir.path())?;

    kcblog(dir.path())?
        .args([
            "build",
            "--stylesheet-url",
            "http://127.0.0.1:1/main.css",
            "--fail-on-asset-error",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to download stylesheet"));
    Ok(())
}

#[test]
fn site_metadata_comes_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "input/index.md", "# Home\n")?;

    kcblog(dir.path())?
        .env("kcSiteName", "Field Notes")
        .env("kcSiteDescription", "Notes from the field")
        .args(["build", "--skip-assets"])
        .assert()
        .success();

    let home = fs::read_to_string(dir.path().join("output/index.html"))?;
    assert!(home.contains("<h1>Field Notes</h1>"));
    assert!(home.contains("<p>Notes from the field</p>"));
    Ok(())
}

#[test]
fn config_file_and_flags_are_layered() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "content/index.md", "# Home\n")?;
    write(dir.path(), "layout.html", "$site_name/$title")?;
    write(
        dir.path(),
        "kcblog.yml",
        r#"
site:
  name: "From File"
paths:
  input: "content"
  output: "public"
  template: "layout.html"
assets:
  skip: true
"#,
    )?;

    kcblog(dir.path())?.arg("build").assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("public/index.html"))?,
        "From File/Home"
    );

    kcblog(dir.path())?
        .args(["build", "--site-name", "From Flag"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(dir.path().join("public/index.html"))?,
        "From Flag/Home"
    );
    Ok(())
}

#[test]
fn output_flag_is_relative_to_working_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "site/content/index.md", "# Home\n")?;
    write(dir.path(), "site/out/keep.txt", "not ours")?;
    write(dir.path(), "site/kcblog.yml", "paths:\n  input: \"content\"\n")?;

    kcblog(dir.path())?
        .args(["--config", "site/kcblog.yml", "build", "--output", "out", "--skip-assets"])
        .assert()
        .success();

    assert!(dir.path().join("out/index.html").is_file());
    assert_eq!(fs::read_to_string(dir.path().join("site/out/keep.txt"))?, "not ours");
    assert!(!dir.path().join("site/out/index.html").exists());
    Ok(())
}

#[test]
fn missing_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    kcblog(dir.path())?
        .args(["build", "--skip-assets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn init_then_build() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    kcblog(dir.path())?.arg("init").assert().success();
    kcblog(dir.path())?
        .args(["build", "--skip-assets"])
        .assert()
        .success();

    assert!(dir.path().join("output/index.html").is_file());
    assert!(dir.path().join("output/posts/hello.html").is_file());
    Ok(())
}
