fn main() -> anyhow::Result<()> {
    liptonweb_lib::run()
}
