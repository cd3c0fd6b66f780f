use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const OUTPUT: &str = "src/registry/generated.rs";
const SHOP: &str = "pub struct ProductResource;\n";

fn shop_project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("src/resources/shop/product.rs", SHOP),
        ("src/resources/shop2/product.rs", SHOP),
        ("src/resources/blog/mod.rs", "pub struct BlogResource;\n"),
        ("src/pages/settings/mod.rs", "pub struct SettingsPage;\n"),
    ])
}

#[test]
fn test_generate_aliases_duplicates() -> Result<()> {
    let test = shop_project()?;

    let output = run(test.generate_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("error[duplicate-name]"));
    assert!(output.stderr.contains("Generated "));

    let generated = test.read_file(OUTPUT)?;
    assert!(generated.starts_with("// Code generated by resgen. DO NOT EDIT.\n"));
    assert!(generated.contains("// Generated at: 2023-11-14 22:13:20\n"));
    assert!(generated.contains("// Resources: 3, pages: 1\n"));
    assert!(generated.contains("use crate::resources::blog;"));
    assert!(generated.contains("use crate::resources::shop as shop_productresource;"));
    assert!(generated.contains("use crate::resources::shop2 as shop2_productresource;"));
    assert!(generated.contains("Box::new(blog::BlogResource::default()),"));
    assert!(generated.contains("Box::new(shop_productresource::ProductResource::default()),"));
    assert!(generated.contains("Box::new(shop2_productresource::ProductResource::default()),"));
    assert!(generated.contains("use crate::pages::settings;"));
    assert!(generated.contains("Box::new(settings::SettingsPage::default()),"));

    Ok(())
}

#[test]
fn test_generate_no_auto_fix() -> Result<()> {
    let test = shop_project()?;

    let mut cmd = test.generate_command();
    cmd.arg("--no-auto-fix");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let generated = test.read_file(OUTPUT)?;
    assert!(generated.contains("use crate::resources::shop;"));
    assert!(generated.contains("Box::new(shop::ProductResource::default()),"));
    assert!(!generated.contains("shop_productresource"));

    Ok(())
}

#[test]
fn test_generate_strict_mode_writes_nothing() -> Result<()> {
    let test = shop_project()?;

    let mut cmd = test.generate_command();
    cmd.arg("--strict");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stderr
            .ends_with("\u{2718} Strict mode: blocking errors detected\n")
    );
    assert!(!test.root().join(OUTPUT).exists());

    Ok(())
}

#[test]
fn test_generate_dry_run_output() -> Result<()> {
    let test = shop_project()?;

    assert_cmd_snapshot!(test.generate_command().arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    // Code generated by resgen. DO NOT EDIT.
    // Generated at: 2023-11-14 22:13:20
    // Resources: 3, pages: 1
    // warning: Type 'ProductResource' doesn't follow naming convention
    // warning: Type 'ProductResource' doesn't follow naming convention

    /// Every discovered resource.
    pub fn resources() -> Vec<Box<dyn super::Resource>> {
        use crate::resources::blog;
        use crate::resources::shop as shop_productresource;
        use crate::resources::shop2 as shop2_productresource;

        vec![
            Box::new(blog::BlogResource::default()),
            Box::new(shop_productresource::ProductResource::default()),
            Box::new(shop2_productresource::ProductResource::default()),
        ]
    }

    /// Every discovered page.
    pub fn pages() -> Vec<Box<dyn super::Page>> {
        use crate::pages::settings;

        vec![
            Box::new(settings::SettingsPage::default()),
        ]
    }

    ----- stderr -----
    error[duplicate-name]: Duplicate type name 'ProductResource' found 2 times across 2 packages
      --> src/resources/shop/product.rs (shop::ProductResource)
      --> src/resources/shop2/product.rs (shop2::ProductResource)
       = help: Rename types to be unique across all packages
               Auto-fix aliases: shop::ProductResource → shop_productresource::ProductResource, shop2::ProductResource → shop2_productresource::ProductResource

    info[naming-convention]: Type 'ProductResource' doesn't follow naming convention
      --> src/resources/shop/product.rs (shop::ProductResource)
       = help: Consider renaming to 'ShopResource' for consistency

    info[naming-convention]: Type 'ProductResource' doesn't follow naming convention
      --> src/resources/shop2/product.rs (shop2::ProductResource)
       = help: Consider renaming to 'Shop2Resource' for consistency

    1 error, 0 warnings, 2 info
    ✓ Dry run: src/registry/generated.rs would be written (856 bytes)
    ");

    assert!(!test.root().join(OUTPUT).exists());

    Ok(())
}

#[test]
fn test_generate_dry_run_prints_without_writing() -> Result<()> {
    let test = shop_project()?;

    let mut cmd = test.generate_command();
    cmd.args(["--dry-run", "--strict"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("// Code generated by resgen. DO NOT EDIT.\n"));
    assert!(output.stdout.contains("shop2_productresource::ProductResource"));
    assert!(output.stderr.contains("Dry run: "));
    assert!(!test.root().join("src/registry").exists());

    Ok(())
}

#[test]
fn test_generate_is_deterministic() -> Result<()> {
    let test = shop_project()?;

    let first = run({
        let mut cmd = test.generate_command();
        cmd.args(["--dry-run", "--jobs", "4"]);
        cmd
    })?;
    let second = run({
        let mut cmd = test.generate_command();
        cmd.args(["--dry-run", "--jobs", "1"]);
        cmd
    })?;

    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_generate_leaves_unchanged_file_alone() -> Result<()> {
    let test = shop_project()?;

    let first = run(test.generate_command())?;
    let before = test.read_file(OUTPUT)?;
    let second = run(test.generate_command())?;

    assert_eq!(first.code, Some(0));
    assert_eq!(second.code, Some(0));
    assert!(second.stderr.contains("is up to date"));
    assert_eq!(test.read_file(OUTPUT)?, before);

    Ok(())
}

#[test]
fn test_generate_custom_output_and_template() -> Result<()> {
    let test = shop_project()?;
    test.write_file(
        "templates/list.hbs",
        "{{#each resources}}{{slug}} {{reference}}\n{{/each}}",
    )?;

    let mut cmd = test.generate_command();
    cmd.args(["--output", "out/list.txt", "--template", "templates/list.hbs"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("out/list.txt")?,
        "blogs blog::BlogResource\nproducts shop_productresource::ProductResource\nproducts shop2_productresource::ProductResource\n"
    );

    Ok(())
}

#[test]
fn test_generate_bad_template_is_fatal() -> Result<()> {
    let test = shop_project()?;
    test.write_file("broken.hbs", "{{#each resources}}")?;

    let mut cmd = test.generate_command();
    cmd.args(["--template", "broken.hbs"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error: invalid template 'registry'"));
    assert!(!test.root().join(OUTPUT).exists());

    Ok(())
}
