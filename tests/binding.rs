use argbind::{
    parse_args, Args, Binding, Bool, BoolFlag, Enum, Flag, Float, Int, IntFlag, IntSlice, Opt,
    Options, Param, Params, ParseError, Str, StrSlice,
};

#[test]
fn test_float_assign_renders_canonical_value() {
    let mut ratio = 0.0;
    {
        let mut binding = Float::new(&mut ratio);
        binding.assign("3.50").unwrap();
        assert_eq!(binding.to_string(), "3.5");
    }
    assert_eq!(ratio, 3.5);
}

#[test]
fn test_flags_accumulate() {
    let mut verbose = 0;
    let mut quiet = false;
    {
        let mut counter = IntFlag::new(&mut verbose);
        let mut switch = BoolFlag::new(&mut quiet);
        for _ in 0..3 {
            counter.update();
            switch.update();
        }
    }
    assert_eq!(verbose, 3);
    assert!(quiet);
}

#[test]
fn test_reset_restores_zero_for_every_shape() {
    let (mut count, mut name, mut on, mut ids) = (7, "x".to_string(), true, vec![1, 2]);
    {
        let mut bindings: Vec<Box<dyn Binding + '_>> = vec![
            Box::new(Int::new(&mut count)),
            Box::new(Str::new(&mut name)),
            Box::new(Bool::new(&mut on)),
            Box::new(IntSlice::new(&mut ids)),
        ];
        for binding in &mut bindings {
            binding.reset();
            assert!(binding.is_zero());
            assert_eq!(binding.non_zero(), "");
        }
    }
    assert_eq!((count, name.as_str(), on, ids.len()), (0, "", false, 0));
}

#[test]
fn test_comma_splitting_depends_on_kind() {
    let (mut ids, mut words) = (Vec::new(), Vec::new());
    {
        let mut options = Options::new()
            .with(Opt::new("id", IntSlice::new(&mut ids)))
            .with(Opt::new("word", StrSlice::new(&mut words)));
        options
            .parse(&mut Args::new(["--id", "1,2,3", "--word", "a,b"]))
            .unwrap();
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(words, vec!["a,b"]);
}

#[test]
fn test_enum_lookup_ignores_case() {
    for token in ["INFO", "Info", "info"] {
        let mut level = 0;
        {
            let mut binding = Enum::new(&mut level, [("info", 1), ("debug", 2)]);
            binding.assign(token).unwrap();
            assert_eq!(binding.to_string(), "info");
        }
        assert_eq!(level, 1);
    }
}

struct Sample {
    count: i64,
    verbose: i64,
    file: String,
}

impl Sample {
    fn new() -> Self {
        Sample {
            count: 0,
            verbose: 0,
            file: String::new(),
        }
    }

    fn parse(&mut self, args: &mut Args) -> Result<(), ParseError> {
        let mut options = Options::new()
            .with(Opt::new("count", Int::new(&mut self.count)).short('c'))
            .with(Opt::new("verbose", IntFlag::new(&mut self.verbose)).short('v'));
        let mut params = Params::new().with(Param::new("file", Str::new(&mut self.file)));
        options.init().unwrap();
        params.init().unwrap();
        parse_args(&mut options, &mut params, args)
    }
}

#[test]
fn test_cluster_then_next_token() {
    let mut sample = Sample::new();
    let mut args = Args::new(["-vvc", "5", "report.txt"]);
    sample.parse(&mut args).unwrap();
    assert_eq!(sample.verbose, 2);
    assert_eq!(sample.count, 5);
    assert_eq!(sample.file, "report.txt");
    assert!(args.is_empty());
}

#[test]
fn test_unknown_option_mutates_nothing() {
    let mut sample = Sample::new();
    let err = sample.parse(&mut Args::new(["--bogus"])).unwrap_err();
    assert_eq!(err, ParseError::UnknownOption("--bogus".to_string()));
    assert!(err.to_string().contains("bogus"));
    assert_eq!((sample.count, sample.verbose), (0, 0));
    assert!(sample.file.is_empty());
}

#[test]
fn test_missing_param_names_it() {
    let mut sample = Sample::new();
    let err = sample.parse(&mut Args::new(["-c", "1"])).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingValue {
            arg: "file".to_string()
        }
    );
    assert_eq!(err.to_string(), "file: requires a value");
}

#[test]
fn test_no_prefix_resets_without_consuming() {
    let mut sample = Sample::new();
    let mut args = Args::new(["-c", "9", "--no-count", "5"]);
    sample.parse(&mut args).unwrap();
    assert_eq!(sample.count, 0);
    assert_eq!(sample.file, "5");
}

#[test]
fn test_lone_dash_is_positional() {
    let mut sample = Sample::new();
    sample.parse(&mut Args::new(["-v", "-"])).unwrap();
    assert_eq!(sample.verbose, 1);
    assert_eq!(sample.file, "-");
}

#[test]
fn test_double_dash_ends_options() {
    let mut sample = Sample::new();
    let mut args = Args::new(["--", "-v", "extra"]);
    sample.parse(&mut args).unwrap();
    assert_eq!(sample.verbose, 0);
    assert_eq!(sample.file, "-v");
    assert_eq!(args.into_vec(), vec!["extra"]);
}
