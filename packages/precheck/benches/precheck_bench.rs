use criterion::{black_box, criterion_group, criterion_main, Criterion};
use livepad_precheck::precheck;

fn precheck_counter_snippet(c: &mut Criterion) {
    let source = r#"
        const root = document.getElementById('root');
        if (root) root.innerHTML = '<div><h3>Example: Counter</h3><div id="counter">Count: 0</div><button id="inc">Inc</button></div>';
        let n = 0;
        const btn = document.getElementById('inc');
        if (btn) btn.addEventListener('click', () => {
            n++;
            const c = document.getElementById('counter');
            if (c) c.textContent = 'Count: ' + n;
        });
    "#;

    c.bench_function("precheck_counter_snippet", |b| {
        b.iter(|| precheck(black_box(source)))
    });
}

fn precheck_templates_and_regexes(c: &mut Criterion) {
    let source = r#"
        const pattern = /^(\d+)\/(\d+)$/g;
        const rows = items.map((item, i) => `<li data-i="${i}">${item.name.replace(/[<>]/g, '')} ${`#${i}`}</li>`);
        document.getElementById('root').innerHTML = `<ul>${rows.join('')}</ul>`;
        const ratio = total / count / 2;
    "#;

    c.bench_function("precheck_templates_and_regexes", |b| {
        b.iter(|| precheck(black_box(source)))
    });
}

fn precheck_large_script(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!(
            "function handler{i}(event) {{ const value = event.target.value / {i}; return `v${{value}}`; }}\n"
        ));
    }

    c.bench_function("precheck_large_script", |b| {
        b.iter(|| precheck(black_box(&source)))
    });
}

criterion_group!(
    benches,
    precheck_counter_snippet,
    precheck_templates_and_regexes,
    precheck_large_script
);
criterion_main!(benches);
