/*!
 * Tests for download link insertion
 */

use notes::transpile::DownloadLinks;

/// Test that URLs are built from the site prefix and the course below the root
#[test]
fn test_urls_withCourseUnderRoot_shouldPointAtChapterAndCoursePdfs() {
    let links = DownloadLinks::new("pdfs", "tex");

    let (chapter, course) = links.urls("tex/algebra/chapters/groups.tex");

    assert_eq!(chapter, "/pdfs/algebra/groups.pdf");
    assert_eq!(course, "/pdfs/algebra/master.pdf");
}

/// Test that stray slashes in the site prefix are normalised
#[test]
fn test_urls_withSlashedSitePrefix_shouldNormaliseSlashes() {
    let links = DownloadLinks::new("/notes//pdfs/", "tex");

    let (chapter, _) = links.urls("tex/algebra/chapters/groups.tex");

    assert_eq!(chapter, "/notes/pdfs/algebra/groups.pdf");
}

/// Test that nested chapters still link to their course
#[test]
fn test_urls_withNestedChapter_shouldUseCourseDirectory() {
    let links = DownloadLinks::new("pdfs", "tex");

    let (chapter, course) = links.urls("tex/algebra/chapters/part1/fields.tex");

    assert_eq!(chapter, "/pdfs/algebra/fields.pdf");
    assert_eq!(course, "/pdfs/algebra/master.pdf");
}

/// Test that the block lands right after the front-matter
#[test]
fn test_annotate_withFrontMatter_shouldInsertAfterFirstBlankLine() {
    let links = DownloadLinks::new("pdfs", "tex");
    let content = "---\ntitle: Groups\n---\n\nBody\n\nMore";

    let output = links.annotate(content, "tex/algebra/chapters/groups.tex");

    assert!(output.starts_with("---\ntitle: Groups\n---\n\n<div style='display: flex; justify-content: space-around;'>"));
    assert!(output.contains("href=\"/pdfs/algebra/groups.pdf\" variant=\"secondary\""));
    assert!(output.contains("href=\"/pdfs/algebra/master.pdf\" variant=\"primary\""));
    assert!(output.ends_with("</div>Body\n\nMore"));
    assert_eq!(output.matches("<LinkButton").count(), 2);
}

/// Test that content without a blank line is left alone
#[test]
fn test_annotate_withoutBlankLine_shouldReturnContentUnchanged() {
    let links = DownloadLinks::new("pdfs", "tex");
    let content = "single line\nanother line";

    assert_eq!(links.annotate(content, "tex/algebra/chapters/groups.tex"), content);
}

/// Test that a course reached through `..` links below the site prefix
#[test]
fn test_urls_withParentDirCourse_shouldUseCourseName() {
    let links = DownloadLinks::new("pdfs", "tex");

    let (chapter, course) = links.urls("../notes/algebra/chapters/groups.tex");

    assert_eq!(chapter, "/pdfs/algebra/groups.pdf");
    assert_eq!(course, "/pdfs/algebra/master.pdf");
}
