use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const HELLO_GOODBYE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<xliff xmlns=\"urn:oasis:names:tc:xliff:document:1.2\" version=\"1.2\">\n\
\t<file original=\"catalog.en_US\" datatype=\"plaintext\" source-language=\"en_US\" target-language=\"en_US\">\n\
\t\t<body>\n\
\t\t\t<trans-unit id=\"1\">\n\
\t\t\t\t<source>Hello, world!</source>\n\
\t\t\t\t<target>Hello, world!</target>\n\
\t\t\t</trans-unit>\n\
\t\t\t<trans-unit id=\"2\">\n\
\t\t\t\t<source>Goodbye</source>\n\
\t\t\t\t<target>Goodbye</target>\n\
\t\t\t</trans-unit>\n\
\t\t</body>\n\
\t</file>\n\
</xliff>\n";

fn hello_goodbye_project() -> Result<CliTest> {
    CliTest::with_file(
        "src/index.twig",
        "<h1>{% trans %}Hello, world!{% endtrans %}</h1>\n<p>{{ __('catalog', 'Goodbye') }}</p>\n",
    )
}

#[test]
fn test_extract_writes_catalog() -> Result<()> {
    let test = hello_goodbye_project()?;

    let output = test
        .extract_command()
        .args(["-m", "catalog", "-l", "en_US"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("out/en_US/catalog.xliff")?, HELLO_GOODBYE);

    Ok(())
}

#[test]
fn test_extract_summary() -> Result<()> {
    let test = hello_goodbye_project()?;

    let output = test
        .extract_command()
        .args(["--module", "catalog", "--lang", "en_US"])
        .output()?;

    insta::assert_snapshot!(String::from_utf8(output.stdout)?, @r"
    ✓ Found 2 phrases (2 new, 0 existing) in 1 file
      source:   src
      catalog:  out/en_US/catalog.xliff (2 phrases)
      language: en_US
      module:   catalog
    ");

    Ok(())
}

#[test]
fn test_second_run_is_byte_identical() -> Result<()> {
    let test = hello_goodbye_project()?;

    test.extract_command()
        .args(["-m", "catalog", "-l", "en_US"])
        .output()?;
    let first = test.read_file("out/en_US/catalog.xliff")?;

    let output = test
        .extract_command()
        .args(["-m", "catalog", "-l", "en_US"])
        .output()?;
    let second = test.read_file("out/en_US/catalog.xliff")?;

    assert_eq!(first, second);
    assert!(String::from_utf8(output.stdout)?.contains("(0 new, 2 existing)"));

    Ok(())
}

#[test]
fn test_existing_translations_are_kept() -> Result<()> {
    let test = CliTest::with_file(
        "src/form.twig",
        "<button>{{ 'Save changes'|trans }}</button>\n<a>{{ \"Cancel\"|trans }}</a>\n",
    )?;
    test.write_file(
        "out/ru_RU/messages.xliff",
        "<?xml version=\"1.0\" ?>\n\
<xliff xmlns=\"urn:oasis:names:tc:xliff:document:1.2\" version=\"1.2\">\n\
\t<file original=\"messages.ru_RU\" datatype=\"plaintext\" source-language=\"ru_RU\" target-language=\"ru_RU\">\n\
\t\t<body>\n\
\t\t\t<trans-unit id=\"1\">\n\
\t\t\t\t<source>Save changes</source>\n\
\t\t\t\t<target>Сохранить изменения</target>\n\
\t\t\t</trans-unit>\n\
\t\t\t<trans-unit id=\"2\">\n\
\t\t\t\t<source>Deleted page</source>\n\
\t\t\t\t<target>Удалённая страница</target>\n\
\t\t\t</trans-unit>\n\
\t\t</body>\n\
\t</file>\n\
</xliff>\n",
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());

    let catalog = test.read_file("out/ru_RU/messages.xliff")?;
    assert!(catalog.contains(
        "<trans-unit id=\"1\">\n\t\t\t\t<source>Save changes</source>\n\t\t\t\t<target>Сохранить изменения</target>"
    ));
    assert!(catalog.contains(
        "<trans-unit id=\"2\">\n\t\t\t\t<source>Deleted page</source>\n\t\t\t\t<target>Удалённая страница</target>"
    ));
    assert!(catalog.contains(
        "<trans-unit id=\"3\">\n\t\t\t\t<source>Cancel</source>\n\t\t\t\t<target>Cancel</target>"
    ));

    Ok(())
}

#[test]
fn test_escaped_quote_is_kept() -> Result<()> {
    let test = CliTest::with_file("src/dialog.twig", r"{{ 'Don\'t save'|trans }}")?;

    test.extract_command().output()?;

    let catalog = test.read_file("out/ru_RU/messages.xliff")?;
    assert!(catalog.contains(r"<source>Don\'t save</source>"));

    Ok(())
}

#[test]
fn test_exclusions() -> Result<()> {
    let test = CliTest::with_file("src/app.twig", "{{ 'Visible'|trans }}")?;
    test.write_file("src/vendor/lib.twig", "{{ 'From vendor'|trans }}")?;
    test.write_file("src/cache/page.php", "<?= __('From cache') ?>")?;
    test.write_file("src/assets/app.min.js", "translate('Minified')")?;

    let output = test
        .extract_command()
        .args(["-e", "vendor,cache", "--exclude", "**/*.min.js"])
        .output()?;
    assert!(output.status.success());

    let catalog = test.read_file("out/ru_RU/messages.xliff")?;
    assert!(catalog.contains("<source>Visible</source>"));
    assert!(!catalog.contains("From vendor"));
    assert!(!catalog.contains("From cache"));
    assert!(!catalog.contains("Minified"));

    Ok(())
}

#[test]
fn test_absolute_exclusion_with_relative_source() -> Result<()> {
    let test = CliTest::with_file("src/app.twig", "{{ 'Visible'|trans }}")?;
    test.write_file("src/vendor/lib.twig", "{{ 'Hidden'|trans }}")?;
    let vendor = test.root().join("src/vendor");

    let output = test
        .extract_command()
        .arg("-e")
        .arg(&vendor)
        .output()?;
    assert!(output.status.success());

    let catalog = test.read_file("out/ru_RU/messages.xliff")?;
    assert!(catalog.contains("<source>Visible</source>"));
    assert!(!catalog.contains("Hidden"));
    assert!(String::from_utf8(output.stdout)?.contains("in 1 file\n"));

    Ok(())
}

#[test]
fn test_translate_with_module_argument() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.php",
        "<?= translate('admin', 'Goodbye') ?>\n<?= translate('Hello') ?>\n",
    )?;

    let output = test.extract_command().args(["-m", "admin"]).output()?;
    assert!(output.status.success());

    let catalog = test.read_file("out/ru_RU/admin.xliff")?;
    assert!(catalog.contains("<source>Goodbye</source>"));
    assert!(catalog.contains("<source>Hello</source>"));
    assert!(!catalog.contains("<source>admin</source>"));

    Ok(())
}

#[test]
fn test_config_file_is_used() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".transgenrc.json",
        r#"{
         "sourceRoot": "templates",
         "outputRoot": "translations",
         "module": "shop",
         "language": "de_DE",
         "excludes": ["legacy"]
     }"#,
    )?;
    test.write_file("templates/cart.twig", "{{ 'Checkout'|trans }}")?;
    test.write_file("templates/legacy/old.twig", "{{ 'Old checkout'|trans }}")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());

    let catalog = test.read_file("translations/de_DE/shop.xliff")?;
    assert!(catalog.contains("original=\"shop.de_DE\""));
    assert!(catalog.contains("<source>Checkout</source>"));
    assert!(!catalog.contains("Old checkout"));

    Ok(())
}

#[test]
fn test_cli_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transgenrc.json", r#"{ "module": "shop", "language": "de_DE" }"#)?;
    test.write_file("src/cart.twig", "{{ 'Checkout'|trans }}")?;

    test.extract_command().args(["-l", "fr_FR"]).output()?;

    assert!(test.root().join("out/fr_FR/shop.xliff").exists());
    assert!(!test.root().join("out/de_DE").exists());

    Ok(())
}

#[test]
fn test_broken_catalog_warns_and_is_rewritten() -> Result<()> {
    let test = CliTest::with_file("src/page.twig", "{{ 'Save'|trans }}")?;
    test.write_file("out/ru_RU/messages.xliff", "<xliff><file><body>")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with(
        "warning: Existing catalog could not be loaded, its translations were discarded\n"
    ));
    assert!(test.read_file("out/ru_RU/messages.xliff")?.contains("<source>Save</source>"));

    Ok(())
}

#[test]
fn test_unreadable_lines_are_quiet_unless_verbose() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/mixed.twig", b"{{ '\xff'|trans }}\n{{ 'Fine'|trans }}\n")?;

    let quiet = test.extract_command().output()?;
    assert!(quiet.status.success());
    assert_eq!(String::from_utf8(quiet.stderr)?, "");

    let verbose = test.extract_command().arg("-v").output()?;
    assert!(verbose.status.success());
    let stderr = String::from_utf8(verbose.stderr)?;
    assert!(stderr.contains("warning: Skipped unreadable text: src/mixed.twig:1: "));

    Ok(())
}

#[test]
fn test_verbose_lists_new_phrases() -> Result<()> {
    let test = hello_goodbye_project()?;

    let output = test
        .extract_command()
        .args(["-m", "catalog", "-l", "en_US", "--verbose"])
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("  + \"Hello, world!\"  src/index.twig:1 (trans_block)\n"));
    assert!(stdout.contains("  + \"Goodbye\"  src/index.twig:2 (module_call)\n"));

    Ok(())
}

#[test]
fn test_missing_source_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8(output.stderr)?,
        "Error: Source directory does not exist: src\n"
    );
    assert!(!test.root().join("out").exists());

    Ok(())
}

#[test]
fn test_unwritable_catalog_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/page.twig", "{{ 'Save'|trans }}")?;
    // A file where the language directory should be.
    test.write_file("out/ru_RU", "not a directory")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.starts_with("Error: "));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("extract"));

    Ok(())
}
