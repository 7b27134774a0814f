fn main() -> anyhow::Result<()> {
    clinvar_csv::cli::run()
}
