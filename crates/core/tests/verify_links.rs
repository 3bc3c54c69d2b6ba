use linkvet_core::{
    Document, Link, LinkCheckError, MarkdownDialect, VerifyLinkError, VerifyOptions,
    scan_file_for_links, verify_links,
};
use std::path::{Path, PathBuf};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn verify(path: &str, content: &str, hrefs: &[&str]) -> Vec<VerifyLinkError> {
    let base = fixture_dir("fixture1");
    let document = Document::new(path, content);
    let links = hrefs.iter().map(|href| Link::new(*href));
    let options = VerifyOptions::default();
    verify_links(&base, &document, links, &options)
        .expect("fixture base is absolute")
        .collect::<Result<Vec<_>, _>>()
        .expect("verification should not fail fatally")
}

/// Asserts one error per href, in order, all of the same kind and code.
fn assert_all(errors: &[VerifyLinkError], hrefs: &[&str], kind: &str, code: &str) {
    assert_eq!(errors.len(), hrefs.len(), "{errors:#?}");
    for (error, href) in errors.iter().zip(hrefs) {
        assert_eq!(error.link().href, *href);
        assert_eq!(error.kind(), kind, "{href}");
        assert_eq!(error.code_str(), code, "{href}");
    }
}

#[test]
fn no_links_no_errors() {
    assert!(verify("other-docs/doc.md", "", &[]).is_empty());
}

#[test]
fn urls_are_not_checked() {
    let errors = verify(
        "other-docs/doc.md",
        "",
        &["https://example.com", "https://example.com/missing#L900"],
    );
    assert!(errors.is_empty());
}

#[test]
fn valid_links() {
    let errors = verify(
        "other-docs/doc.md",
        "",
        &[
            "../README.md",
            "../fake",
            "../docs/doc1.md",
            "../docs/image.png",
            "../notes/stuff.txt",
            "../docs",
        ],
    );
    assert!(errors.is_empty(), "{errors:#?}");
}

#[test]
fn valid_links_with_anchors() {
    let errors = verify(
        "other-docs/doc.md",
        "# heading\n",
        &[
            "../README.md#cool-stuff",
            "../docs/doc1.md#first-section",
            "#heading",
            "../notes/stuff.txt#L2",
            "../notes/stuff.txt#L4=",
            "../notes/stuff.txt#L1-L2",
            "../notes/stuff.txt#L2-L5=",
            "../notes/stuff.txt#L50",
        ],
    );
    assert!(errors.is_empty(), "{errors:#?}");
}

#[test]
fn missing_files() {
    let hrefs = ["test.md", "./fail/ure", "../real.md", "../docs/doc3.md", "../nope.txt#L1"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "file", "FILE_NOT_EXISTS");
}

#[test]
fn files_outside_base() {
    let hrefs = ["../../sentinel", "../../does-not-exist.md", "../", "/etc/hosts"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "file", "FILE_OUTSIDE_BASE");
}

#[test]
fn links_back_to_own_document() {
    let hrefs = ["./doc.md", "doc.md#heading", "../other-docs/doc.md#"];
    let errors = verify("other-docs/doc.md", "# heading\n", &hrefs);
    assert_all(&errors, &hrefs, "file", "CONVERT_PURE_ANCHOR");
}

#[test]
fn pure_anchor_without_heading() {
    let errors = verify(
        "other-docs/doc.md",
        "# a heading\na [broken](#heading) link\n",
        &["#heading"],
    );
    assert_all(&errors, &["#heading"], "anchor", "HEADING_MATCH_FAIL");
}

#[test]
fn pure_anchors_in_files_without_extension() {
    let errors = verify(
        "other-docs/doc",
        "# a heading\na [link](#a-heading)\n",
        &["#a-heading"],
    );
    assert_all(&errors, &["#a-heading"], "anchor", "NO_ANCHORS_IN_FILETYPE");
}

#[test]
fn pure_anchors_in_unrecognized_files() {
    let errors = verify(
        "other-docs/doc.test",
        "# a heading\na [link](#a-heading)\n",
        &["#a-heading"],
    );
    assert_all(&errors, &["#a-heading"], "anchor", "NO_ANCHORS_IN_FILETYPE");
}

#[test]
fn empty_anchors() {
    let hrefs = ["#", "../README.md#"];
    let errors = verify(
        "other-docs/document",
        "# a heading\na [link](#)\nanother [link](../README.md#)\n",
        &hrefs,
    );
    assert_all(&errors, &hrefs, "anchor", "EMPTY_ANCHOR");
}

#[test]
fn anchors_into_binary_files() {
    let hrefs = ["../docs/image.png#heading", "../docs/image.png#L42"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "BINARY_FILE");
}

#[test]
fn anchors_into_files_without_extension() {
    let hrefs = ["../fake#nope", "../fake#L10", "../docs#intro"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "ANCHOR_UNDISCOVERABLE");
}

#[test]
fn missing_heading_anchors() {
    let hrefs = ["../README.md#nope", "../docs/doc1.md#maybe"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "HEADING_MATCH_FAIL");
}

#[test]
fn line_anchors_into_documents() {
    let hrefs = ["../README.md#L3", "../docs/doc1.md#L20", "#L45"];
    let errors = verify("other-docs/doc.md", "# a heading\n", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "HEADING_MATCH_FAIL");
}

#[test]
fn line_anchors_out_of_range() {
    let hrefs = ["../notes/stuff.txt#L100", "../notes/stuff.txt#L51", "../notes/stuff.txt#L10-L60"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "LINE_TARGET_FAIL");
}

#[test]
fn malformed_line_anchors() {
    let hrefs = ["../notes/stuff.txt#L01", "../notes/stuff.txt#LXYZ"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "LINE_TARGET_INVALID");
}

#[test]
fn inverted_line_ranges() {
    let hrefs = ["../notes/stuff.txt#L2-L1"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "MULTI_LINE_TARGET_RANGE_INVALID");
}

#[test]
fn non_line_anchors_into_text_files() {
    let hrefs = ["../notes/stuff.txt#intro"];
    let errors = verify("other-docs/doc.md", "", &hrefs);
    assert_all(&errors, &hrefs, "anchor", "NO_ANCHORS_IN_FILETYPE");
}

#[test]
fn errors_follow_link_order() {
    let errors = verify(
        "other-docs/doc.md",
        "",
        &["../gone.md", "../README.md", "#", "../../sentinel"],
    );
    let summary: Vec<String> = errors.iter().map(ToString::to_string).collect();
    insta::assert_debug_snapshot!(summary, @r#"
    [
        "line ?: ../gone.md (file error FILE_NOT_EXISTS)",
        "line ?: # (anchor error EMPTY_ANCHOR)",
        "line ?: ../../sentinel (file error FILE_OUTSIDE_BASE)",
    ]
    "#);
}

#[test]
fn relative_base_is_fatal() {
    let document = Document::new("README.md", "");
    let options = VerifyOptions::default();
    let result = verify_links(Path::new("fixture1"), &document, Vec::<Link>::new(), &options);
    assert!(matches!(result, Err(LinkCheckError::InvalidBasePath(_))));
}

#[test]
fn scans_fixture_documents() {
    let base = fixture_dir("fixture1");
    let options = VerifyOptions::default();
    let hrefs = |path: &str| -> Vec<String> {
        let document = Document::read(&base, path).expect("fixture exists");
        scan_file_for_links(&document, &options.scan_options())
            .expect("fixture parses")
            .into_iter()
            .map(|link| link.href)
            .collect()
    };

    assert_eq!(
        hrefs("README.md"),
        vec!["./docs/doc1.md", "./docs/doc2.md", "./docs/doc2.md#cool-stuff"]
    );
    assert_eq!(
        hrefs("docs/doc1.md"),
        vec!["https://google.com", "./doc2.md#secret-stuff", "./doc2.md#cool-stuff"]
    );
    assert_eq!(hrefs("docs/doc2.md"), vec!["image.png", "https://example.com"]);
}

#[test]
fn fixture_documents_verify_end_to_end() {
    let base = fixture_dir("fixture1");
    let options = VerifyOptions::default().with_dialect(MarkdownDialect::Gfm);
    for path in ["README.md", "docs/doc1.md", "docs/doc2.md"] {
        let document = Document::read(&base, path).expect("fixture exists");
        let links = scan_file_for_links(&document, &options.scan_options()).expect("parses");
        let errors: Vec<_> = verify_links(&base, &document, links, &options)
            .expect("absolute base")
            .collect::<Result<_, _>>()
            .expect("no fatal errors");
        assert!(errors.is_empty(), "{path}: {errors:#?}");
    }
}

#[test]
fn self_link_in_fixture_two() {
    let base = fixture_dir("fixture2");
    let options = VerifyOptions::default();
    let document = Document::read(&base, "docs/doc.md").expect("fixture exists");
    let links = scan_file_for_links(&document, &options.scan_options()).expect("parses");
    let errors: Vec<_> = verify_links(&base, &document, links, &options)
        .expect("absolute base")
        .collect::<Result<_, _>>()
        .expect("no fatal errors");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 3: ./doc.md#a-heading (file error CONVERT_PURE_ANCHOR)");
}
