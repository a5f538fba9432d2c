#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("surf2vol error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use surf2vol_engine::output::write_output;
    use surf2vol_engine::parse::{grid_xml, mask_expr, surface_asc};
    use surf2vol_engine::smap::{
        DEBUG_MAX_LEVEL, Datum, MapFunction, Params, SmapOptions, SurfaceSet, map_surfaces,
        parse_steps,
    };

    const USAGE: &str = r#"surf2vol (surf2vol-engine)

USAGE:
  surf2vol maps
  surf2vol run --grid <grid.xml> --surf <surface> [--surf <surface>] --map <function> [options]

OPTIONS (run):
  --grid <path>        Grid document (XML) defining dimensions, geometry and values
  --surf <path>        Surface node file; give two for an inner/outer pair
  --map <function>     Mapping function (see `surf2vol maps`)
  --mask-expr <expr>   Inclusion mask expression, e.g. 'step(a - 100)'
  --m2-steps <n>       Refinement levels for mask2, 1..100 (default 2); level n
                       adds n samples, so n levels cost n*(n+1)/2 per node
  --brick <n>          Grid brick sampled by midpoint/ave/min/max (default 0)
  --datum <type>       Output value type: byte, short or float
  --debug <level>      Debug level 0..4
  --debug-node <node>  Node traced sample by sample at debug level 3+
  --no-head            Do not write header rows
  --out <path>         Write rows to this file instead of stdout
  --overwrite          Overwrite an existing --out file
  -h, --help           Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "maps" => {
                print_maps();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_maps() {
        for map in MapFunction::ALL {
            println!("{:<10} {}", map.name(), map.description());
        }
    }

    #[derive(Default)]
    struct RunArgs {
        grid: Option<PathBuf>,
        surfaces: Vec<PathBuf>,
        map: Option<String>,
        mask_expr: Option<String>,
        m2_steps: Option<i64>,
        brick: usize,
        datum: Option<String>,
        debug: u8,
        debug_node: Option<usize>,
        no_head: bool,
        out: Option<PathBuf>,
        overwrite: bool,
    }

    fn parse_run_args(args: &mut Args) -> Result<Option<RunArgs>, String> {
        let mut run = RunArgs::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--grid" => run.grid = Some(PathBuf::from(args.value("--grid")?)),
                "--surf" => run.surfaces.push(PathBuf::from(args.value("--surf")?)),
                "--map" => run.map = Some(args.value("--map")?),
                "--mask-expr" => run.mask_expr = Some(args.value("--mask-expr")?),
                "--m2-steps" => run.m2_steps = Some(args.number("--m2-steps")?),
                "--brick" => run.brick = args.number("--brick")?,
                "--datum" => run.datum = Some(args.value("--datum")?),
                "--debug" => run.debug = args.number("--debug")?,
                "--debug-node" => run.debug_node = Some(args.number("--debug-node")?),
                "--no-head" => run.no_head = true,
                "--out" => run.out = Some(PathBuf::from(args.value("--out")?)),
                "--overwrite" => run.overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(None);
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        Ok(Some(run))
    }

    fn build_options(run: &RunArgs) -> Result<SmapOptions, String> {
        let map: MapFunction = run
            .map
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|e| format!("{e}"))?;

        let mut opts = SmapOptions::new(map).with_debug(run.debug);
        opts.no_head = run.no_head;
        opts.brick = run.brick;
        opts.debug_node = run.debug_node;
        if let Some(steps) = run.m2_steps {
            opts.m2_steps = parse_steps(steps).map_err(|e| e.to_string())?;
        }
        if let Some(datum) = run.datum.as_deref() {
            opts.datum = datum.parse::<Datum>().map_err(|e| e.to_string())?;
        }
        opts.validate().map_err(|e| e.to_string())?;
        Ok(opts)
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let Some(run) = parse_run_args(args)? else {
            return Ok(());
        };
        init_logger(run.debug);

        let opts = build_options(&run)?;
        log::debug!("{opts}");

        let grid_path = run.grid.as_deref().ok_or("missing --grid")?;
        if run.surfaces.is_empty() {
            return Err("missing --surf (give one surface, or two for an inner/outer pair)".to_string());
        }
        if let Some(path) = run.out.as_deref() {
            check_writable(path, run.overwrite)?;
        }

        let grid = grid_xml::read_file(grid_path)
            .map_err(|e| format!("read grid {}: {e}", grid_path.display()))?;
        log::info!("grid `{}`: {grid}", grid.label());

        let mut surfaces = SurfaceSet::new();
        for path in &run.surfaces {
            let surface = surface_asc::read_surface(path)
                .map_err(|e| format!("read surface {}: {e}", path.display()))?;
            log::info!("surface `{}`: {} nodes", surface.label, surface.node_count());
            surfaces.push(surface);
        }

        let mask = match run.mask_expr.as_deref() {
            Some(expression) => {
                opts.check_brick(&grid).map_err(|e| e.to_string())?;
                Some(
                    mask_expr::compile_mask(&grid, expression, opts.brick)
                        .map_err(|e| e.to_string())?,
                )
            }
            None => None,
        };
        let params = Params::new(&grid, mask.as_ref().map(|mask| mask.mask.as_slice()))
            .map_err(|e| e.to_string())?;
        log::debug!("{params}");

        let (nodes, output) =
            map_surfaces(&opts, &params, &grid, &surfaces).map_err(|e| e.to_string())?;
        let diagnostics = output.diagnostics();
        for warning in &diagnostics.warnings {
            log::warn!("{warning}");
        }

        let rows = match run.out.as_deref() {
            Some(path) => {
                let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
                let mut writer = BufWriter::new(file);
                let rows = write_output(&mut writer, &opts, &params, &grid, &nodes, &output)
                    .map_err(|e| format!("write {}: {e}", path.display()))?;
                eprintln!("wrote {}", path.display());
                rows
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                write_output(&mut writer, &opts, &params, &grid, &nodes, &output)
                    .map_err(|e| format!("write stdout: {e}"))?
            }
        };

        eprintln!("{} | rows={rows}", diagnostics.summary());
        Ok(())
    }

    fn check_writable(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    struct StderrLogger;

    impl log::Log for StderrLogger {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata()) {
                eprintln!("[{}] {}", record.level(), record.args());
            }
        }

        fn flush(&self) {
            let _ = io::stderr().flush();
        }
    }

    static LOGGER: StderrLogger = StderrLogger;

    fn init_logger(debug: u8) {
        let level = match debug.min(DEBUG_MAX_LEVEL) {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn number<T: std::str::FromStr>(&mut self, flag: &str) -> Result<T, String> {
            let value = self.value(flag)?;
            value
                .trim()
                .parse()
                .map_err(|_| format!("invalid value `{value}` for {flag}"))
        }
    }
}
