fn main() -> anyhow::Result<()> {
    hoptrace::hoptrace()
}
