//! Showcase document seeded into fresh stores.

/// Id of the seeded document.
pub const DEFAULT_DOCUMENT_ID: &str = "default";

/// Title of the seeded document.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Interactive MDX Showcase";

/// Content of the seeded document, demonstrating both shortcodes.
pub const DEFAULT_DOCUMENT_CONTENT: &str = r#"# Interactive MDX Showcase

Welcome to the **MDX Interactive Platform**! This editor supports real-time preview with custom shortcodes.

[interactivesection]
## Try Our Interactive Features

This section is automatically highlighted and animated when you wrap content in the `interactivesection` shortcode.
[/interactivesection]

## Interactive Questions

[yesno-question question="Do you find this platform useful?"]

[yesno-question question="Would you like to learn more about MDX?"]

## Standard Markdown

You can still use regular markdown features:

- **Bold text**
- *Italic text*
- `Code snippets`
- [Links](https://example.com)"#;
