use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("taxe-vacance"));
    cmd.arg("--no-color");
    cmd
}

#[test]
fn search_lists_ranked_candidates() {
    cli()
        .arg("search")
        .arg("pari")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Paris (75056)"))
        .stdout(predicate::str::contains("Villeparisis (77514)"));
}

#[test]
fn search_all_is_alphabetical() {
    cli()
        .args(["search", "pari", "--all"])
        .assert()
        .success()
        .stdout("75056\tParis\tTLV\n81202\tParisot\tNONE\n82137\tParisot\tNONE\n77514\tVilleparisis\tTLV\n");
}

#[test]
fn search_without_match_is_not_an_error() {
    cli()
        .args(["search", "xyzzy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aucune commune trouvée."));
}

#[test]
fn show_by_code_renders_notice_and_sections() {
    cli()
        .args(["show", "75056"])
        .assert()
        .success()
        .stdout(predicate::str::contains("La commune de Paris est située en zone tendue."))
        .stdout(predicate::str::contains("Conditions d'application de la TLV"))
        .stdout(predicate::str::contains("https://www.legifrance.gouv.fr"));
}

#[test]
fn piped_output_is_never_colored() {
    Command::new(assert_cmd::cargo::cargo_bin!("taxe-vacance"))
        .env("CLICOLOR_FORCE", "1")
        .args(["show", "75056"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("⚠ Votre logement"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn search_with_decomposed_accent() {
    cli()
        .args(["search", "E\u{301}vry", "--all"])
        .assert()
        .success()
        .stdout("91228\tÉvry-Courcouronnes\tTLV\n");
}

#[test]
fn show_by_name_ignores_case_and_accents() {
    cli()
        .args(["show", "saint-etienne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a instauré la THLV"));
}

#[test]
fn show_untaxed_commune_as_json() {
    cli()
        .args(["show", "Aurillac", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"severity\": \"success\""))
        .stdout(predicate::str::contains("\"details\": null"));
}

#[test]
fn show_ambiguous_name_fails_with_codes() {
    cli()
        .args(["show", "Parisot"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("81202"))
        .stdout(predicate::str::contains("82137"));
}

#[test]
fn show_unknown_commune_suggests() {
    cli()
        .args(["show", "Pari"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Suggestions"))
        .stdout(predicate::str::contains("Paris (75056)"));
}

#[test]
fn explain_unknown_classification_falls_back() {
    cli()
        .args(["explain", "TLVX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Information indisponible"));
}

#[test]
fn explain_known_classification() {
    cli()
        .args(["explain", "THLV", "--commune", "Brest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("La commune de Brest a instauré la THLV."))
        .stdout(predicate::str::contains("Quelles sont les alternatives ?"));
}

#[test]
fn list_rejects_unknown_classification() {
    cli()
        .args(["list", "--tax-type", "XYZ"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("XYZ"));
}

#[test]
fn list_filters_by_classification() {
    cli()
        .args(["list", "--tax-type", "thlv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("29019\tBrest\tTHLV"))
        .stdout(predicate::str::contains("TLV\n").not());
}

#[test]
fn invalid_config_exits_with_config_code() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("taxe-vacance.toml");
    fs::write(&path, "[search]\nmax_candidates = 0\n").expect("write config");

    cli()
        .arg("--config")
        .arg(&path)
        .args(["search", "pari"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("max_candidates"));
}

#[test]
fn config_limits_candidates_and_hides_links() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("taxe-vacance.toml");
    fs::write(&path, "[search]\nmax_candidates = 1\n[display]\nshow_links = false\n")
        .expect("write config");

    cli()
        .arg("--config")
        .arg(&path)
        .args(["search", "pari"])
        .assert()
        .success()
        .stdout("  1. Paris (75056)\n");

    cli()
        .arg("--config")
        .arg(&path)
        .args(["show", "75056"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://").not());
}

#[test]
fn interactive_session_from_stdin() {
    cli()
        .arg("interactive")
        .write_stdin("Pari\n#1\n\nbrest\n=29019\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Paris (75056)"))
        .stdout(predicate::str::contains("zone tendue"))
        .stdout(predicate::str::contains("a instauré la THLV"));
}
