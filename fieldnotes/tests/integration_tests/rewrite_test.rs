// tests/integration_tests/rewrite_test.rs
use anyhow::Result;
use fieldnotes::models::RefSyntax;
use fieldnotes::{PathRewriter, find_image_references};

#[test]
fn test_references_in_document_order_per_syntax() {
    let body = "<img src=\"media/c.png\">\n![a](./media/a.png)\n![](https://x.org/b.gif)";
    let refs = find_image_references(body);

    let paths: Vec<&str> = refs.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["./media/a.png", "https://x.org/b.gif", "media/c.png"]);
    assert_eq!(refs[0].syntax, RefSyntax::Markdown);
    assert_eq!(refs[2].syntax, RefSyntax::Html);
    assert_eq!(refs[1].filename(), "b.gif");
}

#[test]
fn test_rewrite_is_idempotent_and_leaves_foreign_paths() -> Result<()> {
    let rewriter = PathRewriter::new("media", "/static/media")?;
    let body = "![a](./media/a.png) ![b](../media/b.png) ![c](media/sub/c.png)\n\
                <img class=\"wide\" src='media/d.png'>\n\
                ![e](https://example.org/media/e.png) ![f](images/f.png)";

    let once = rewriter.rewrite(body);
    assert!(once.contains("![a](/static/media/a.png)"));
    assert!(once.contains("![b](/static/media/b.png)"));
    assert!(once.contains("![c](/static/media/c.png)"));
    assert!(once.contains("<img class=\"wide\" src='/static/media/d.png'>"));
    assert!(once.contains("![e](https://example.org/media/e.png)"));
    assert!(once.contains("![f](images/f.png)"));
    assert_eq!(rewriter.rewrite(&once), once);
    Ok(())
}
