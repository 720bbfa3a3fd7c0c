//! Closing segments: conclusions with the policy statement, then the end screen.

use crate::foundation::error::ReelResult;
use crate::presentation::Stage;
use crate::presentation::data::{CONCLUSIONS, END_CREDIT, END_TEXT, POLICY};
use crate::scene::color::BLUE;
use crate::scene::mobject::{
    DOWN, FRAME_WIDTH, LEFT, Layout, MED_LARGE_BUFF, MED_SMALL_BUFF, arrange,
};
use crate::scene::shapes::{Text, title as section_title};
use crate::timeline::animate::{Animation, Play};

pub(crate) fn conclusions(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading_m = section_title(&fonts, "Conclusions and Policy Implications")?;
    let heading_box = heading_m.bbox();
    let heading = stage.add(heading_m);
    stage.play(Play::new(Animation::Write(heading)))?;

    let mut items = CONCLUSIONS
        .iter()
        .map(|&(text, keyword, color)| {
            let mut m = Text::plain(text)
                .font_size(28.0)
                .highlight(keyword, color)
                .build(&fonts)?;
            m.fit_width(FRAME_WIDTH - 1.0);
            Ok(m)
        })
        .collect::<ReelResult<Vec<_>>>()?;
    arrange(&mut items, DOWN, MED_LARGE_BUFF, LEFT);
    items.next_to(heading_box, DOWN, MED_LARGE_BUFF);

    let mut policy = Text::tex(POLICY).font_size(32.0).color(BLUE).build(&fonts)?;
    policy.fit_width(FRAME_WIDTH - 1.0);
    policy.to_edge(DOWN, MED_LARGE_BUFF);

    let ids = stage.add_all(items);
    let policy = stage.add(policy);

    for (&id, hold) in ids.iter().zip([2.0, 2.0, 2.0, 3.0]) {
        stage.play(Play::new(Animation::Write(id)))?;
        stage.wait(hold)?;
    }
    stage.play(Play::new(Animation::Write(policy)))?;
    stage.wait(4.0)?;

    let mut all = vec![heading, policy];
    all.extend(ids);
    stage.clear(&all)?;
    stage.wait(1.0)
}

pub(crate) fn end_screen(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let end = Text::plain(END_TEXT).font_size(40.0).build(&fonts)?;
    let mut credit = Text::plain(END_CREDIT).font_size(28.0).italic().build(&fonts)?;
    credit.next_to(end.bbox(), DOWN, MED_SMALL_BUFF);

    let end = stage.add(end);
    let credit = stage.add(credit);
    stage.play(Play::new(Animation::Write(end)))?;
    stage.play(Play::new(Animation::Write(credit)))?;
    stage.wait(5.0)?;
    stage.play(Play::all([Animation::FadeOut(end), Animation::FadeOut(credit)]))
}
