// src/main.rs

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use piezodesign::config::{DesignFile, Waveform};
use piezodesign::models::circuit::{bill_of_materials, lowpass_cutoff};
use piezodesign::models::material::{find_material, materials, relative_coefficient, Material};
use piezodesign::models::sensor::calibration_curve;
use piezodesign::models::DerivedCharacteristics;
use piezodesign::project::links::search_links;
use piezodesign::project::{DesignReport, ProjectStore};
use piezodesign::simulation::csv::{setup_csv_output, write_csv_header};
use piezodesign::simulation::framework::{run_preview, PreviewSettings, DEFAULT_REFRESH_HZ};
use piezodesign::simulation::load_parameters::{load_design, normalize_design};
use piezodesign::DesignError;

#[derive(Parser, Debug)]
#[command(name = "piezodesign", about = "圧電式力センサの設計計算")]
struct Cli {
    /// 設計ファイル (YAML)。省略時は既定値
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// 材料名 (設計ファイルの指定を上書き)
    #[arg(short, long, global = true)]
    material: Option<String>,

    /// プロジェクト保存ファイル (JSON)
    #[arg(long, global = true, default_value = "projects.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 特性値を計算する
    Calc,
    /// チャージアンプの部品定数と部品表を表示する
    Schematic,
    /// 材料カタログを表示する
    Materials {
        /// 詳細を表示する材料名
        #[arg(short, long)]
        name: Option<String>,
    },
    /// 材料の外部検索リンクを表示する
    Links,
    /// 試験信号のプレビューを実行する
    Test {
        #[arg(short, long)]
        waveform: Option<Waveform>,
        /// 振幅 (N)
        #[arg(short, long)]
        amplitude: Option<f64>,
        /// 周波数 (Hz)
        #[arg(short, long)]
        frequency: Option<f64>,
        /// 実行時間 (s)
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,
        /// ティック周波数 (Hz)
        #[arg(long, default_value_t = DEFAULT_REFRESH_HZ)]
        refresh: f64,
        /// 実時間で実行する
        #[arg(long)]
        realtime: bool,
        /// CSV出力先 (省略時は標準出力)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// 設計レポートを書き出す
    Export {
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// プロジェクトの保存・読み込み
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectAction {
    /// 現在の設定を保存する
    Save { name: String },
    /// 保存済みプロジェクトの一覧
    List,
    /// プロジェクトを読み込んで特性値を表示する
    Load { id: String },
    /// プロジェクトを削除する
    Delete { id: String },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // 設計ファイルの読み込み
    let mut design = match &cli.config {
        Some(path) => load_design(path)?,
        None => DesignFile::default(),
    };
    if let Some(name) = &cli.material {
        design.material = name.clone();
        design = normalize_design(design)?;
    }
    let material = design.resolve_material()?;
    let store = ProjectStore::new(cli.store.clone());

    match cli.command {
        Commands::Calc => print_characteristics(&design, material),
        Commands::Schematic => print_schematic(&design, material),
        Commands::Materials { name } => print_materials(name.as_deref())?,
        Commands::Links => {
            for (kind, url) in search_links(material) {
                println!("{:<13} {}", kind.label(), url);
            }
        }
        Commands::Test {
            waveform,
            amplitude,
            frequency,
            duration,
            refresh,
            realtime,
            output,
        } => {
            let mut signal = design.test_signal.clone();
            if let Some(w) = waveform {
                signal.waveform = w;
            }
            if let Some(a) = amplitude {
                signal.amplitude = a;
            }
            if let Some(f) = frequency {
                signal.frequency = f;
            }
            let settings = PreviewSettings {
                duration,
                refresh_hz: refresh,
                realtime,
            };

            let mut writer: Box<dyn Write> = match output {
                Some(path) => setup_csv_output(&path)?,
                None => {
                    let mut stdout: Box<dyn Write> = Box::new(io::stdout());
                    write_csv_header(&mut *stdout)?;
                    stdout
                }
            };
            let summary = run_preview(&mut *writer, &signal, &design.sensor, &design.construction, &settings)?;
            eprintln!("ticks: {}, peak output: {:.2} N", summary.ticks, summary.peak_output);
        }
        Commands::Export { dir } => {
            let report = DesignReport::new(material, &design.sensor, &design.construction, chrono::Utc::now());
            let path = report.export(&dir)?;
            println!("{}", path.display());
        }
        Commands::Project { action } => run_project_action(&store, action, &design, material)?,
    }

    Ok(())
}

fn run_project_action(
    store: &ProjectStore,
    action: ProjectAction,
    design: &DesignFile,
    material: &'static Material,
) -> Result<(), Box<dyn Error>> {
    match action {
        ProjectAction::Save { name } => {
            let saved = store.save(&name, &design.sensor, material)?;
            println!("saved {} ({}) to {}", saved.name, saved.id, store.path().display());
        }
        ProjectAction::List => {
            for p in store.list()? {
                println!(
                    "{}  {:<24} {:<22} {}",
                    p.id,
                    p.name,
                    p.material_name,
                    p.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        ProjectAction::Load { id } => {
            // 材料が見つからない場合は現在の選択を維持する
            let project = store.load_or_keep(&id, material)?;
            let mut loaded = design.clone();
            loaded.sensor = project.project.params.clamped();
            loaded.material = project.material.name.to_string();
            print_characteristics(&loaded, project.material);
        }
        ProjectAction::Delete { id } => {
            let removed = store.delete(&id)?;
            println!("deleted {} ({})", removed.name, removed.id);
        }
    }
    Ok(())
}

fn print_characteristics(design: &DesignFile, material: &Material) {
    let d = DerivedCharacteristics::compute(&design.sensor, material, &design.construction);
    println!("Material            {} ({})", material.name, material.category);
    println!("Capacitance         {:.2} pF", d.capacitance);
    println!("Resonant frequency  {:.2} kHz", d.resonant_frequency);
    println!("Output voltage      {:.2} V", d.output_voltage);
    println!("Temperature range   {}...+{} °C", d.temperature_range.0, d.temperature_range.1);
    println!("Stack thickness     {:.2} mm", d.stack_thickness);
    println!("Element gap         {:.3} m", d.element_gap);
    let positions: Vec<String> = d.element_positions.iter().map(|x| format!("{:.3}", x)).collect();
    println!("Element positions   [{}] m", positions.join(", "));
}

fn print_schematic(design: &DesignFile, material: &Material) {
    let d = DerivedCharacteristics::compute(&design.sensor, material, &design.construction);
    let amp = &d.amplifier;
    println!("Cf (feedback)       {:.1} pF", amp.feedback_capacitance);
    println!("Rf (feedback)       {:.2} MOhm", amp.feedback_resistor);
    println!("Rp (leakage)        {:.0} GOhm", amp.leakage_resistance);
    println!("Gain                x{:.1}", amp.gain);
    println!("Rg (gain set)       {:.1} kOhm", amp.gain_resistor);
    println!("Output @ 100 N      {:.2} V", amp.output_voltage);
    println!("Low-pass cutoff     {:.2} kHz", lowpass_cutoff() / 1000.0);
    println!(
        "Bandwidth           {} Hz ... {:.1} kHz",
        amp.bandwidth.lower_hz, amp.bandwidth.upper_khz
    );
    println!();
    for item in bill_of_materials(amp, material, design.construction.piezo_elements) {
        println!("{:<6} {:<24} {:>3}  {}", item.reference, item.part, item.quantity, item.description);
    }
}

fn print_materials(name: Option<&str>) -> Result<(), Box<dyn Error>> {
    match name {
        None => {
            for m in materials() {
                println!(
                    "{:<22} {:<15} d33 {:>7} pC/N  [{:>5.1} %]",
                    m.name,
                    m.category,
                    m.piezo_coefficient,
                    relative_coefficient(m) * 100.0
                );
            }
        }
        Some(name) => {
            let m = find_material(name).ok_or_else(|| DesignError::MaterialNotFound(name.to_string()))?;
            println!("{} ({})", m.name, m.category);
            println!("  d33                {} pC/N", m.piezo_coefficient);
            println!("  Density            {} kg/m³", m.density);
            println!("  Young's modulus    {} GPa", m.young_modulus);
            println!("  Curie temperature  {} °C", m.curie);
            if let Some(ext) = &m.extended {
                println!("  Measurement range  {}", ext.measurement_range);
                println!("  Sensitivity tol.   {}", ext.sensitivity_tolerance);
                println!("  Threshold          {}", ext.detection_threshold);
                println!("  Accuracy           {}", ext.accuracy);
                println!("  Operating temp.    {}", ext.operating_temperature);
                println!("  Protection         {}", ext.ip_rating);
            }
            if let Some(curve) = calibration_curve(m, 1000.0, 5) {
                println!("  Calibration (illustrative)");
                for (load, value) in curve {
                    println!("    {:>7.1} N -> {:.2}", load, value);
                }
            }
        }
    }
    Ok(())
}
