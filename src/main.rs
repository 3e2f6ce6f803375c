fn main() -> std::process::ExitCode {
    eco_balance_lib::run()
}
