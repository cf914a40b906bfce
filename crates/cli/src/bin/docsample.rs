use anyhow::Result;

fn main() -> Result<()> {
    docsample_cli::main_entry()
}
