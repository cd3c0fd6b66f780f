use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const SHOP: &str = "pub struct ProductResource;\n";

#[test]
fn test_scan_clean_project() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/user/mod.rs", "pub struct UserResource;\n"),
        ("src/resources/post/mod.rs", "pub struct PostResource;\nstruct Hidden;\n"),
    ])?;

    let output = run(test.scan_command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Scanned 2 resources\n");

    Ok(())
}

#[test]
fn test_scan_reports_duplicates_across_packages() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/shop/product.rs", SHOP),
        ("src/resources/shop2/product.rs", SHOP),
    ])?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
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
    ✓ Scanned 2 resources (3 conflicts detected)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_strict_mode_fails_on_errors() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/shop/product.rs", SHOP),
        ("src/resources/shop2/product.rs", SHOP),
    ])?;

    assert_cmd_snapshot!(test.scan_command().arg("--strict"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
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
    ✘ Strict mode: blocking errors detected

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_strict_mode_passes_warnings() -> Result<()> {
    let test = CliTest::with_files(&[("src/resources/blog/mod.rs", "pub struct Item;\n")])?;

    let mut cmd = test.scan_command();
    cmd.arg("--strict");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("warning[generic-name]: Generic type name 'Item' should be more specific"));
    assert!(output.stdout.contains("= help: Rename 'Item' to 'BlogItem'"));

    Ok(())
}

#[test]
fn test_scan_parse_error_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/user/mod.rs", "pub struct UserResource;\n"),
        ("src/resources/broken/mod.rs", "pub struct BrokenResource {\n"),
    ])?;

    let output = run(test.scan_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.starts_with("Error: Scan failed: failed to scan "));
    assert!(output.stderr.contains("broken"));

    Ok(())
}

#[test]
fn test_scan_missing_resources_dir_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.scan_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error: Scan failed: failed to walk "));

    Ok(())
}

#[test]
fn test_scan_exclude_prunes_directories() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/user/mod.rs", "pub struct UserResource;\n"),
        ("src/resources/legacy/mod.rs", "this is not rust"),
    ])?;

    let mut cmd = test.scan_command();
    cmd.args(["--exclude", "legacy"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "\u{2713} Scanned 1 resources\n");

    Ok(())
}

#[test]
fn test_scan_uses_config_file() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".resgenrc.json",
            r#"{ "resourcesPath": "admin/resources", "resourcesModule": "crate::admin::resources" }"#,
        ),
        ("admin/resources/user/mod.rs", "pub struct UserResource;\n"),
    ])?;

    let mut cmd = test.scan_command();
    cmd.arg("--json");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let report: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["success"], true);
    assert_eq!(report["resources"][0]["typeName"], "UserResource");
    assert_eq!(
        report["resources"][0]["modulePath"],
        "crate::admin::resources::user"
    );
    assert_eq!(report["resources"][0]["slug"], "users");

    Ok(())
}

#[test]
fn test_scan_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[(".resgenrc.json", r#"{ "excludePatterns": ["[oops"] }"#)])?;

    let output = run(test.scan_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("excludePatterns"));

    Ok(())
}

#[test]
fn test_scan_verbose_lists_declarations() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/resources/company/mod.rs", "pub struct CompanyResource;\n"),
        ("src/pages/settings/mod.rs", "pub struct SettingsPage;\n"),
    ])?;

    let mut cmd = test.scan_command();
    cmd.arg("-v");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(
        "resource: company::CompanyResource /companies  src/resources/company/mod.rs\n"
    ));
    assert!(
        output
            .stdout
            .contains("page: settings::SettingsPage /settings  src/pages/settings/mod.rs\n")
    );
    assert!(output.stderr.contains("scan:"));

    Ok(())
}
