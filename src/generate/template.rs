/// Built-in registration module template.
///
/// Renders `resources()` and `pages()`, each with its own imports so a
/// resource package and a page package may share a name. Every registered
/// type must implement `Default` and the matching trait in the parent module.
pub const DEFAULT_TEMPLATE: &str = r#"// Code generated by resgen. DO NOT EDIT.
// Generated at: {{timestamp}}
// Resources: {{count}}, pages: {{page_count}}
{{#each warnings}}
// warning: {{this}}
{{/each}}

/// Every discovered resource.
pub fn resources() -> Vec<Box<dyn super::Resource>> {
{{#each imports}}
{{#if direct}}
    use {{path}};
{{/if}}
{{#each aliases}}
    use {{../path}} as {{this}};
{{/each}}
{{/each}}

    vec![
{{#each resources}}
        Box::new({{reference}}::default()),
{{/each}}
    ]
}

/// Every discovered page.
pub fn pages() -> Vec<Box<dyn super::Page>> {
{{#each page_imports}}
{{#if direct}}
    use {{path}};
{{/if}}
{{#each aliases}}
    use {{../path}} as {{this}};
{{/each}}
{{/each}}

    vec![
{{#each pages}}
        Box::new({{reference}}::default()),
{{/each}}
    ]
}
"#;
